//! Per-call resource budgets.

use crate::ParseError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Resource ceiling a caller authorizes for a single invocation.
///
/// There is no default budget anywhere in the gateway: every call site
/// states its own limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallBudget {
    #[serde(with = "crate::numeric")]
    pub compute_limit: BigUint,

    #[serde(with = "crate::numeric")]
    pub proof_size_limit: BigUint,

    /// `None` means unlimited.
    #[serde(
        with = "crate::numeric::opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_deposit_limit: Option<BigUint>,
}

impl CallBudget {
    pub fn new(compute_limit: impl Into<BigUint>, proof_size_limit: impl Into<BigUint>) -> Self {
        Self {
            compute_limit: compute_limit.into(),
            proof_size_limit: proof_size_limit.into(),
            storage_deposit_limit: None,
        }
    }

    pub fn with_storage_deposit_limit(mut self, limit: impl Into<BigUint>) -> Self {
        self.storage_deposit_limit = Some(limit.into());
        self
    }

    /// A zero compute limit is always a caller mistake; fail fast instead
    /// of forwarding it to the node.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.compute_limit == BigUint::from(0u8) {
            return Err(ParseError::ZeroComputeLimit);
        }
        Ok(())
    }
}
