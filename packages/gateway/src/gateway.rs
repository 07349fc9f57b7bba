//! The gateway facade: connect, resolve, call, close.
//!
//! One logical session per gateway. Queries are side-effect-free reads,
//! so any number of calls may be issued concurrently against the same
//! contract handle; nothing is serialized or retried here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::client::{ChainCallRequest, ChainClient, ChainInfo, HttpChainClient, TransportError};
use crate::error::Error;
use gateway_types::{AccountId, CallBudget, InterfaceDescriptor, Outcome, ParseError, ResourceUsage};

/// A contract interface bound to an on-chain address.
///
/// Resolved once, read-only thereafter. Cheap to clone and safe to share
/// between concurrent calls.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    descriptor: Arc<InterfaceDescriptor>,
    address: AccountId,
}

impl ContractHandle {
    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn descriptor(&self) -> &InterfaceDescriptor {
        &self.descriptor
    }
}

/// Read/call gateway over a single chain session.
pub struct Gateway<C = HttpChainClient> {
    client: C,
    info: ChainInfo,
    call_timeout: Duration,
    closed: AtomicBool,
}

impl Gateway<HttpChainClient> {
    /// Open a session against `endpoint` and run the readiness probe.
    pub async fn connect(endpoint: &str, call_timeout: Duration) -> Result<Self, Error> {
        let url = Url::parse(endpoint)
            .map_err(|e| Error::Connection(format!("invalid endpoint {endpoint}: {e}")))?;
        Self::with_client(HttpChainClient::new(url), call_timeout).await
    }
}

impl<C: ChainClient> Gateway<C> {
    /// Open a session over an existing chain client.
    pub async fn with_client(client: C, call_timeout: Duration) -> Result<Self, Error> {
        let info = client
            .chain_info()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        info!(chain = %info.chain, genesis = %info.genesis_hash, "Connected");
        Ok(Self {
            client,
            info,
            call_timeout,
            closed: AtomicBool::new(false),
        })
    }

    pub fn chain_info(&self) -> &ChainInfo {
        &self.info
    }

    /// Bind an interface descriptor to an on-chain address.
    ///
    /// Pure binding: no network round-trip. A malformed address or an
    /// unparseable descriptor fails this resolution attempt only.
    pub fn resolve_contract(&self, metadata: &Value, address: &str) -> Result<ContractHandle, Error> {
        let address: AccountId = address
            .parse()
            .map_err(|e: ParseError| Error::Resolution(e.to_string()))?;
        let descriptor = InterfaceDescriptor::from_json(metadata)
            .map_err(|e| Error::Resolution(e.to_string()))?;
        debug!(contract = ?descriptor.name(), address = %address, "Resolved contract");
        Ok(ContractHandle {
            descriptor: Arc::new(descriptor),
            address,
        })
    }

    /// Invoke `method` as a read-only query under `caller`'s identity.
    ///
    /// Caller-input errors (unknown method, zero compute limit) are
    /// rejected before any I/O. A contract-level rejection is a normal
    /// result: it comes back as a non-succeeded [`Outcome`], not an
    /// `Err`. A timeout fails the operation and the session stays live;
    /// a transport failure ends the session, and every later call fails
    /// with [`Error::NotConnected`] until a fresh connect.
    pub async fn call(
        &self,
        contract: &ContractHandle,
        method: &str,
        caller: &AccountId,
        args: &[Value],
        budget: &CallBudget,
    ) -> Result<Outcome, Error> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::NotConnected);
        }
        let message = contract
            .descriptor
            .message(method)
            .ok_or_else(|| Error::UnknownMethod(method.to_string()))?;
        budget
            .validate()
            .map_err(|e| Error::InvalidBudget(e.to_string()))?;

        let request = ChainCallRequest {
            origin: caller.clone(),
            dest: contract.address.clone(),
            message: message.label.clone(),
            selector: message.selector,
            args: args.to_vec(),
            compute_limit: budget.compute_limit.clone(),
            proof_size_limit: budget.proof_size_limit.clone(),
            storage_deposit_limit: budget.storage_deposit_limit.clone(),
        };

        debug!(method, caller = %caller, "Dispatching contract query");
        let response = tokio::time::timeout(self.call_timeout, self.client.call_contract(request))
            .await
            .map_err(|_| Error::Timeout(timeout_millis(self.call_timeout)))?
            .map_err(|e| self.fail_session(e))?;

        let resource_used = ResourceUsage {
            compute_consumed: response.compute_consumed,
            storage_deposit_charged: response.storage_deposit_charged,
        };
        Ok(match response.verdict {
            Ok(value) => Outcome::success(value, resource_used),
            Err(detail) => {
                debug!(method, %detail, "Contract rejected the query");
                Outcome::contract_error(detail, resource_used)
            }
        })
    }

    /// A transport failure ends the session; the caller must reconnect.
    fn fail_session(&self, e: TransportError) -> Error {
        if !self.closed.swap(true, Ordering::AcqRel) {
            warn!(chain = %self.info.chain, error = %e, "Transport failure, session failed");
        }
        Error::Connection(e.to_string())
    }

    /// Release the session. Idempotent: closing twice is a no-op.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!(chain = %self.info.chain, "Gateway closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Millisecond bound reported in [`Error::Timeout`], saturating rather
/// than truncating for durations past `u64::MAX` milliseconds.
fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
