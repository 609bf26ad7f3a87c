//! CLI interface for dasl-trading
//!
//! Provides subcommands for:
//! - `simulate`: Run the simulation and write the CSV report (default)
//! - `request`: Print the simulation request without sending it
//! - `report`: Convert a saved simulation response to CSV
//! - `config`: Show effective configuration

mod report;
mod request;
mod simulate;

pub use report::ReportArgs;
pub use request::RequestArgs;
pub use simulate::SimulateArgs;

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dasl-trading")]
#[command(about = "Runs a DARL trading simulation on darl.ai and writes a CSV report")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, default_value = "dasl.toml", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the simulation and write the CSV report
    Simulate(SimulateArgs),
    /// Print the simulation request without sending it
    Request(RequestArgs),
    /// Convert a saved simulation response to CSV
    Report(ReportArgs),
    /// Show configuration
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Simulate(SimulateArgs::default())
    }
}

/// Overrides for the simulation inputs
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Opening account balance
    #[arg(long)]
    pub balance: Option<f64>,

    /// Price table to use instead of the bundled GBP/USD data
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Rule script to use instead of the bundled one
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

impl InputArgs {
    /// Apply the overrides to `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(balance) = self.balance {
            config.run.initial_balance = balance;
        }
        if let Some(prices) = &self.prices {
            config.run.prices = Some(prices.clone());
        }
        if let Some(rules) = &self.rules {
            config.run.rules = Some(rules.clone());
        }
    }
}

/// Print the effective configuration
pub fn show_config(config: &Config) {
    println!("Current configuration:");
    println!("  Simulator: {}", config.simulator.url);
    match config.simulator.timeout_secs {
        0 => println!("  Timeout: none"),
        secs => println!("  Timeout: {}s", secs),
    }
    println!("  Initial balance: {}", config.run.initial_balance);
    println!(
        "  Prices: {}",
        describe_input(config.run.prices.as_deref(), "bundled GBP_USD.csv")
    );
    println!(
        "  Rules: {}",
        describe_input(config.run.rules.as_deref(), "bundled trading_simulation.darl")
    );
    println!("  Output: {}", config.run.output.display());
    println!(
        "  Logging: {} ({:?})",
        config.telemetry.log_level, config.telemetry.log_format
    );
}

fn describe_input(path: Option<&Path>, bundled: &str) -> String {
    path.map_or_else(|| bundled.to_string(), |p| p.display().to_string())
}
