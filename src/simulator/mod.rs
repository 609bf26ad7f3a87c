//! Remote simulation
//!
//! The trading logic runs behind the DaslSimulate API; this module only
//! ships the request and decodes the reply.

mod client;

pub use client::{decode_response, DaslClient, SimulatorConfig, DASL_SIMULATE_URL};

use crate::dasl::{DaslData, DaslSet};
use async_trait::async_trait;
use thiserror::Error;

/// Simulation call errors
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Connection, timeout or transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Service answered with a non-success status
    #[error("Simulation service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body is not a time series set
    #[error("Failed to decode simulation response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Trait for simulation backends
#[async_trait]
pub trait Simulator: Send + Sync {
    /// Run the request's rules over its history
    async fn simulate(&self, request: &DaslData) -> Result<DaslSet, SimulatorError>;
}
