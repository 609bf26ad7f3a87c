//! DaslSimulate API client
//!
//! Posts a rule script and price history to darl.ai and reads back the
//! simulated time series. One request per run: no retries, no auth.

use super::{Simulator, SimulatorError};
use crate::dasl::{DaslData, DaslSet};
use crate::telemetry::{record_latency, set_gauge, GaugeMetric, LatencyMetric};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// DaslSimulate endpoint
pub const DASL_SIMULATE_URL: &str = "https://darl.ai/api/Linter/DaslSimulate";

/// Longest slice of an error body kept in [`SimulatorError::Status`]
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the simulation client
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Endpoint receiving the simulation request
    pub url: String,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            url: DASL_SIMULATE_URL.to_string(),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Client for the DaslSimulate API
pub struct DaslClient {
    config: SimulatorConfig,
    client: Client,
}

impl DaslClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, SimulatorError> {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Wrap an existing HTTP client
    ///
    /// The client's own timeout applies; `config.timeout` is ignored.
    pub fn with_client(client: Client, config: SimulatorConfig) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}

#[async_trait]
impl Simulator for DaslClient {
    async fn simulate(&self, request: &DaslData) -> Result<DaslSet, SimulatorError> {
        let url = &self.config.url;
        let states = request.history.len();
        set_gauge(GaugeMetric::RequestStates, states as f64);

        tracing::debug!(url = %url, states, "Posting simulation request");

        let started = Instant::now();
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed = started.elapsed();
        record_latency(LatencyMetric::Simulate, elapsed);

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Simulation request rejected");
            return Err(SimulatorError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let result = decode_response(&body)?;
        set_gauge(GaugeMetric::ResponseStates, result.len() as f64);

        tracing::info!(
            status = status.as_u16(),
            states = result.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Simulation complete"
        );

        Ok(result)
    }
}

/// Decode a DaslSimulate response body
///
/// Fields the exchange format does not know are ignored.
pub fn decode_response(body: &str) -> Result<DaslSet, SimulatorError> {
    serde_json::from_str(body).map_err(SimulatorError::Decode)
}
