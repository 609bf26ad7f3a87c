//! Report command implementation

use crate::config::Config;
use crate::pipeline;
use crate::simulator::decode_response;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Saved simulation response (JSON)
    pub input: PathBuf,

    /// CSV report path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let body = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let response = decode_response(&body)?;

        let output = self.output.clone().unwrap_or(config.run.output);
        let records = pipeline::write_results(&response, &output)?;
        println!("Wrote {} rows to {}", records.len(), output.display());
        Ok(())
    }
}
