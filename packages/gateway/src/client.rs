//! Chain client: the wire-protocol collaborator.
//!
//! The gateway never frames RPC traffic itself; everything that touches
//! the wire goes through [`ChainClient`]. [`HttpChainClient`] speaks
//! JSON-RPC 2.0 over HTTP against a single node endpoint.

use async_trait::async_trait;
use gateway_types::AccountId;
use num_bigint::BigUint;
use serde_json::{json, Value};
use url::Url;

/// Chain name and genesis hash, fetched once as a readiness probe.
#[derive(Debug, Clone)]
pub struct ChainInfo {
    pub chain: String,
    pub genesis_hash: String,
}

/// A dry-run contract call, fully resolved: selector, arguments, budget.
#[derive(Debug, Clone)]
pub struct ChainCallRequest {
    pub origin: AccountId,
    pub dest: AccountId,
    pub message: String,
    pub selector: [u8; 4],
    pub args: Vec<Value>,
    pub compute_limit: BigUint,
    pub proof_size_limit: BigUint,
    pub storage_deposit_limit: Option<BigUint>,
}

/// Node-side view of a dry-run call: what the contract said plus the
/// resources it consumed.
#[derive(Debug, Clone)]
pub struct ChainCallResponse {
    /// `Ok(decoded output)` or `Err(contract-level error detail)`.
    pub verdict: Result<Value, String>,
    pub compute_consumed: BigUint,
    pub storage_deposit_charged: BigUint,
}

/// Transport-level failure. Fails the whole operation; never carries a
/// contract verdict.
#[derive(Debug)]
pub struct TransportError(pub String);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Readiness probe: chain name + genesis hash.
    async fn chain_info(&self) -> Result<ChainInfo, TransportError>;

    /// Execute a read-only contract call as a dry run.
    async fn call_contract(
        &self,
        request: ChainCallRequest,
    ) -> Result<ChainCallResponse, TransportError>;
}

/// JSON-RPC 2.0 chain client over HTTP.
///
/// The underlying `reqwest::Client` pools connections and is safe for
/// concurrent use, so any number of calls may be in flight at once.
pub struct HttpChainClient {
    url: Url,
    http: reqwest::Client,
}

impl HttpChainClient {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError(format!("{method}: {e}")))?;
        if !response.status().is_success() {
            return Err(TransportError(format!(
                "{method}: node returned {}",
                response.status()
            )));
        }
        let reply: Value = response
            .json()
            .await
            .map_err(|e| TransportError(format!("{method}: malformed reply: {e}")))?;
        if let Some(err) = reply.get("error").filter(|e| !e.is_null()) {
            return Err(TransportError(format!("{method}: node error: {err}")));
        }
        reply
            .get("result")
            .cloned()
            .ok_or_else(|| TransportError(format!("{method}: reply without result")))
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn chain_info(&self) -> Result<ChainInfo, TransportError> {
        let chain = self
            .rpc("system_chain", json!([]))
            .await?
            .as_str()
            .ok_or_else(|| TransportError("system_chain: non-string reply".into()))?
            .to_string();
        let genesis_hash = self
            .rpc("chain_getBlockHash", json!([0]))
            .await?
            .as_str()
            .ok_or_else(|| TransportError("chain_getBlockHash: non-string reply".into()))?
            .to_string();
        Ok(ChainInfo {
            chain,
            genesis_hash,
        })
    }

    async fn call_contract(
        &self,
        request: ChainCallRequest,
    ) -> Result<ChainCallResponse, TransportError> {
        let mut call = json!({
            "origin": request.origin.as_str(),
            "dest": request.dest.as_str(),
            "message": {
                "label": request.message,
                "selector": format!("0x{}", hex::encode(request.selector)),
                "args": request.args,
            },
            "gasLimit": {
                "refTime": request.compute_limit.to_string(),
                "proofSize": request.proof_size_limit.to_string(),
            },
        });
        if let Some(limit) = &request.storage_deposit_limit {
            call["storageDepositLimit"] = Value::String(limit.to_string());
        }

        let result = self.rpc("contracts_call", json!([call])).await?;
        parse_call_result(&result)
    }
}

fn parse_call_result(result: &Value) -> Result<ChainCallResponse, TransportError> {
    let compute_consumed =
        parse_quantity(result.pointer("/gasConsumed/refTime"), "gasConsumed.refTime")?;
    let storage_deposit_charged = parse_quantity(result.get("storageDeposit"), "storageDeposit")?;
    let success = result
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| TransportError("contracts_call: reply without success flag".into()))?;

    let verdict = if success {
        Ok(result.get("output").cloned().unwrap_or(Value::Null))
    } else {
        Err(result
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("contract rejected the call")
            .to_string())
    };

    Ok(ChainCallResponse {
        verdict,
        compute_consumed,
        storage_deposit_charged,
    })
}

fn parse_quantity(value: Option<&Value>, field: &str) -> Result<BigUint, TransportError> {
    match value {
        Some(Value::String(s)) => s
            .parse()
            .map_err(|e| TransportError(format!("contracts_call: {field}: {e}"))),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(BigUint::from)
            .ok_or_else(|| TransportError(format!("contracts_call: {field}: not an unsigned integer"))),
        _ => Err(TransportError(format!("contracts_call: {field}: missing"))),
    }
}
