//! Persistence gateway for transformed records.
//!
//! The mapping engine hands the renamed records to a [`PersistenceGateway`].
//! [`HttpGateway`] stores them through a JSON endpoint; [`submit_detached`]
//! runs a submission without blocking the caller and reports the outcome to
//! the log only.

#![deny(unsafe_code)]

mod client;
mod config;
mod detached;
mod error;

use serde_json::Value;

pub use client::HttpGateway;
pub use config::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, GatewayConfig};
pub use detached::{PendingSubmission, submit_detached};
pub use error::{GatewayError, Result};

/// Accepts transformed records for storage.
pub trait PersistenceGateway {
    /// Store `records` and return the storage response.
    fn submit(&self, records: &[Value]) -> Result<Value>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn submit(&self, records: &[Value]) -> Result<Value> {
        (**self).submit(records)
    }
}
