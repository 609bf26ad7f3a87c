//! Request command implementation

use super::InputArgs;
use crate::config::Config;
use crate::pipeline;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RequestArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Write the JSON here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl RequestArgs {
    pub async fn execute(&self, mut config: Config) -> anyhow::Result<()> {
        self.inputs.apply(&mut config);

        let request = pipeline::build_request(&config.run)?;
        let json = serde_json::to_string_pretty(&request)?;

        match &self.out {
            Some(path) => {
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(
                    path = %path.display(),
                    states = request.history.len(),
                    "Wrote simulation request"
                );
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}
