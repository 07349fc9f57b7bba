//! Normalized contract-call outcomes.

use num_bigint::BigUint;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Resources consumed by a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceUsage {
    #[serde(with = "crate::numeric")]
    pub compute_consumed: BigUint,

    #[serde(with = "crate::numeric")]
    pub storage_deposit_charged: BigUint,
}

#[derive(Debug, Clone, PartialEq)]
enum CallResult {
    Value(Value),
    Error(String),
}

/// Normalized result of a contract invocation.
///
/// A succeeded outcome always carries a decoded value (possibly null) and
/// never an error detail; a failed outcome the reverse. The internal enum
/// makes any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    result: CallResult,
    resource_used: ResourceUsage,
}

impl Outcome {
    pub fn success(value: Value, resource_used: ResourceUsage) -> Self {
        Self {
            result: CallResult::Value(value),
            resource_used,
        }
    }

    /// A contract-level rejection. This is a normal query result, not an
    /// operation failure.
    pub fn contract_error(detail: impl Into<String>, resource_used: ResourceUsage) -> Self {
        Self {
            result: CallResult::Error(detail.into()),
            resource_used,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.result, CallResult::Value(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match &self.result {
            CallResult::Value(v) => Some(v),
            CallResult::Error(_) => None,
        }
    }

    pub fn error_detail(&self) -> Option<&str> {
        match &self.result {
            CallResult::Value(_) => None,
            CallResult::Error(detail) => Some(detail),
        }
    }

    pub fn resource_used(&self) -> &ResourceUsage {
        &self.resource_used
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 3)?;
        state.serialize_field("succeeded", &self.succeeded())?;
        match &self.result {
            CallResult::Value(v) => state.serialize_field("value", v)?,
            CallResult::Error(detail) => state.serialize_field("error_detail", detail)?,
        }
        state.serialize_field("resource_used", &self.resource_used)?;
        state.end()
    }
}
