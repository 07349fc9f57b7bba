//! Shared types and pure-logic utilities for the contract gateway.
//! No I/O and no chain-client dependency — usable by any caller that
//! needs to build budgets or interpret outcomes.

mod address;
mod budget;
mod descriptor;
mod error;
pub mod numeric;
mod outcome;

pub use address::AccountId;
pub use budget::CallBudget;
pub use descriptor::{InterfaceDescriptor, MessageSpec};
pub use error::ParseError;
pub use outcome::{Outcome, ResourceUsage};
