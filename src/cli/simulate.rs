//! Simulate command implementation

use super::InputArgs;
use crate::config::Config;
use crate::pipeline;
use crate::simulator::DaslClient;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// CSV report path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Simulation endpoint
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds (0 = none)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Also save the decoded service response as JSON
    #[arg(long)]
    pub save_response: Option<PathBuf>,
}

impl SimulateArgs {
    /// Apply the overrides to `config`
    pub fn apply(&self, config: &mut Config) {
        self.inputs.apply(config);
        if let Some(output) = &self.output {
            config.run.output = output.clone();
        }
        if let Some(url) = &self.url {
            config.simulator.url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.simulator.timeout_secs = secs;
        }
        if let Some(path) = &self.save_response {
            config.run.save_response = Some(path.clone());
        }
    }

    pub async fn execute(&self, mut config: Config) -> anyhow::Result<()> {
        self.apply(&mut config);

        let client = DaslClient::with_config(config.simulator.to_simulator_config())?;
        tracing::info!(url = %config.simulator.url, "Starting simulation");

        let summary = pipeline::run(&client, &config.run).await?;
        println!(
            "Simulated {} states, wrote {}",
            summary.response_states,
            summary.output.display()
        );
        Ok(())
    }
}
