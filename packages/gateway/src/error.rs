//! Error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Gateway error type.
///
/// A contract-level rejection is not represented here: it comes back as a
/// non-succeeded `Outcome`. Everything below fails the operation itself.
#[derive(Debug)]
pub enum Error {
    /// Configuration error.
    Config(String),
    /// Transport or node handshake failure.
    Connection(String),
    /// Malformed address or unparseable interface descriptor.
    Resolution(String),
    /// Method not present in the bound interface.
    UnknownMethod(String),
    /// Rejected call budget.
    InvalidBudget(String),
    /// The gateway session has been closed.
    NotConnected,
    /// No response from the node within the configured bound (ms).
    Timeout(u64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Connection(msg) => write!(f, "connection error: {msg}"),
            Error::Resolution(msg) => write!(f, "resolution error: {msg}"),
            Error::UnknownMethod(method) => write!(f, "unknown contract method: {method}"),
            Error::InvalidBudget(msg) => write!(f, "invalid budget: {msg}"),
            Error::NotConnected => write!(f, "gateway is not connected"),
            Error::Timeout(ms) => write!(f, "no response from node within {ms}ms"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Connection(_) => StatusCode::BAD_GATEWAY,
            Error::Resolution(_) | Error::UnknownMethod(_) | Error::InvalidBudget(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotConnected => StatusCode::SERVICE_UNAVAILABLE,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        };
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });
        (status, Json(body)).into_response()
    }
}
