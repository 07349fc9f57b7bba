//! Gateway configuration.

use serde::Deserialize;

/// Configuration for the contract gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::endpoint_url")]
    pub endpoint_url: String,

    #[serde(default = "defaults::contract_address")]
    pub contract_address: String,

    #[serde(default = "defaults::metadata_path")]
    pub metadata_path: String,

    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    #[serde(default = "defaults::call_timeout_ms")]
    pub call_timeout_ms: u64,

    /// Budget for queries issued by the HTTP layer. The gateway core has
    /// no default budget; this server is just another caller stating one.
    /// Decimal strings, since the quantities may exceed 64 bits.
    #[serde(default = "defaults::compute_limit")]
    pub compute_limit: String,

    #[serde(default = "defaults::proof_size_limit")]
    pub proof_size_limit: String,

    #[serde(default)]
    pub storage_deposit_limit: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: defaults::endpoint_url(),
            contract_address: defaults::contract_address(),
            metadata_path: defaults::metadata_path(),
            bind_address: defaults::bind_address(),
            call_timeout_ms: defaults::call_timeout_ms(),
            compute_limit: defaults::compute_limit(),
            proof_size_limit: defaults::proof_size_limit(),
            storage_deposit_limit: None,
        }
    }
}

mod defaults {
    fn network() -> String {
        std::env::var("GATEWAY_NETWORK").unwrap_or_else(|_| "testnet".into())
    }

    pub fn endpoint_url() -> String {
        if let Ok(url) = std::env::var("GATEWAY_ENDPOINT_URL") {
            if !url.is_empty() {
                return url;
            }
        }
        if network().contains("mainnet") {
            "https://rpc.azero.dev".into()
        } else {
            "https://rpc.test.azero.dev".into()
        }
    }

    pub fn contract_address() -> String {
        "5HPxrgxXKty68BJNT3RGikEEQNrTmKngTXJLYqGQ62FVcGF6".into()
    }

    pub fn metadata_path() -> String {
        "./contract_metadata.json".into()
    }

    pub fn bind_address() -> String {
        "0.0.0.0:3000".into()
    }

    pub fn call_timeout_ms() -> u64 {
        30_000
    }

    pub fn compute_limit() -> String {
        "4999999999999".into()
    }

    pub fn proof_size_limit() -> String {
        "1000000".into()
    }
}
