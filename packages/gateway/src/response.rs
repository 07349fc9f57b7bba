//! Response types for the gateway API.

use gateway_types::Outcome;
use serde::Serialize;

/// Response from the transfer endpoint.
#[derive(Serialize)]
pub struct TransferResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransferResponse {
    pub fn ok(outcome: Outcome) -> Self {
        Self {
            result: Some(outcome),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chain: String,
    pub genesis_hash: String,
    pub contract_address: String,
    pub uptime_secs: u64,
    pub requests: u64,
}
