//! HTTP request handlers.

use crate::error::Error;
use crate::response::{HealthResponse, TransferResponse};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gateway_types::{AccountId, ParseError};
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Health check with basic metrics.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let info = state.gateway.chain_info();
    Json(HealthResponse {
        status: "ok",
        chain: info.chain.clone(),
        genesis_hash: info.genesis_hash.clone(),
        contract_address: state.contract.address().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub method: String,
    pub caller: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Run a read-only contract query under the server's configured budget.
pub async fn query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<impl IntoResponse, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    info!(method = %request.method, "Querying contract");

    let caller: AccountId = request
        .caller
        .parse()
        .map_err(|e: ParseError| Error::Resolution(e.to_string()))?;
    let outcome = state
        .gateway
        .call(
            &state.contract,
            &request.method,
            &caller,
            &request.args,
            &state.budget,
        )
        .await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub sender: String,
    pub receiver: String,
    /// Forwarded to the contract as-is; number or decimal string.
    pub amount: Value,
}

/// Dry-run `transfer` as a query under the sender's identity.
///
/// Boundary contract: `200 {result}` when the contract accepts it,
/// `500 {error}` on any failure.
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TransferRequest>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    info!(sender = %request.sender, receiver = %request.receiver, "Transfer query");

    let parsed = request
        .sender
        .parse::<AccountId>()
        .and_then(|sender| request.receiver.parse::<AccountId>().map(|r| (sender, r)));
    let (sender, receiver) = match parsed {
        Ok(pair) => pair,
        Err(e) => {
            warn!(error = %e, "Rejecting transfer with malformed address");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TransferResponse::err(e.to_string())),
            );
        }
    };

    let args = vec![Value::String(receiver.to_string()), request.amount];
    match state
        .gateway
        .call(&state.contract, "transfer", &sender, &args, &state.budget)
        .await
    {
        Ok(outcome) if outcome.succeeded() => (StatusCode::OK, Json(TransferResponse::ok(outcome))),
        Ok(outcome) => {
            let detail = outcome.error_detail().unwrap_or("transfer rejected").to_string();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TransferResponse::err(detail)),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(TransferResponse::err(e.to_string())),
        ),
    }
}
