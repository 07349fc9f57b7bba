//! Application state shared across handlers.

use crate::client::HttpChainClient;
use crate::config::Config;
use crate::error::Error;
use crate::gateway::{ContractHandle, Gateway};
use gateway_types::CallBudget;
use num_bigint::BigUint;
use std::sync::atomic::AtomicU64;
use std::time::{Duration, Instant};
use tracing::info;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub gateway: Gateway<HttpChainClient>,
    pub contract: ContractHandle,
    pub budget: CallBudget,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Connect, resolve the configured contract, and validate the server's
    /// query budget. Fails fast on any of the three.
    pub async fn new(config: Config) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(&config.metadata_path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", config.metadata_path))
        })?;
        let metadata: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid metadata JSON: {e}")))?;

        let budget = parse_budget(&config)?;
        budget
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        let gateway = Gateway::connect(
            &config.endpoint_url,
            Duration::from_millis(config.call_timeout_ms),
        )
        .await?;
        let contract = gateway.resolve_contract(&metadata, &config.contract_address)?;

        info!(contract = %contract.address(), "Contract resolved");

        Ok(Self {
            config,
            gateway,
            contract,
            budget,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }
}

fn parse_budget(config: &Config) -> Result<CallBudget, Error> {
    fn quantity(field: &str, value: &str) -> Result<BigUint, Error> {
        value
            .parse()
            .map_err(|e| Error::Config(format!("{field}: {e}")))
    }

    let mut budget = CallBudget::new(
        quantity("compute_limit", &config.compute_limit)?,
        quantity("proof_size_limit", &config.proof_size_limit)?,
    );
    if let Some(limit) = &config.storage_deposit_limit {
        budget = budget.with_storage_deposit_limit(quantity("storage_deposit_limit", limit)?);
    }
    Ok(budget)
}
