//! Configuration types for dasl-trading

use crate::simulator::{SimulatorConfig, DASL_SIMULATE_URL};
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulator: ServiceConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Simulation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// DaslSimulate endpoint
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds (0 = wait indefinitely)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    DASL_SIMULATE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Client settings for this service section
    pub fn to_simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            url: self.url.clone(),
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

/// Inputs and outputs of one simulation run
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Opening account balance placed on the earliest state
    #[serde(default = "default_initial_balance")]
    pub initial_balance: f64,

    /// CSV report path, overwritten on each run
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Price table replacing the bundled GBP/USD data
    #[serde(default)]
    pub prices: Option<PathBuf>,

    /// Rule script replacing the bundled trading simulation
    #[serde(default)]
    pub rules: Option<PathBuf>,

    /// Free text sent as the history description
    #[serde(default)]
    pub description: Option<String>,

    /// Where to keep the decoded service response as JSON
    #[serde(default)]
    pub save_response: Option<PathBuf>,
}

fn default_initial_balance() -> f64 {
    10_000.0
}
fn default_output() -> PathBuf {
    PathBuf::from("results.csv")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            output: default_output(),
            prices: None,
            rules: None,
            description: None,
            save_response: None,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
