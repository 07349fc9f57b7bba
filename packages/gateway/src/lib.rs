//! # Contract Gateway
//!
//! A read/call gateway for ink! contract queries. Connects to a chain
//! node, binds a contract interface descriptor to an on-chain address,
//! and invokes read-only messages under an explicit resource budget,
//! normalizing the heterogeneous node reply into a single [`Outcome`]
//! shape. Signing and broadcast are out of scope; everything here is a
//! dry-run query.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin gateway
//! ```
//!
//! ## Endpoints
//! - `GET /health` - Health check with chain info and metrics
//! - `POST /query` - Run a read-only contract query
//! - `POST /transfer` - Dry-run a token transfer as a query

pub mod client;
pub mod config;
mod error;
pub mod gateway;
mod handlers;
mod response;
mod router;
mod state;

pub use client::{ChainClient, ChainInfo, HttpChainClient};
pub use config::Config;
pub use error::Error;
pub use gateway::{ContractHandle, Gateway};
pub use router::create as create_router;
pub use state::AppState;

pub use gateway_types::{AccountId, CallBudget, InterfaceDescriptor, Outcome, ResourceUsage};
