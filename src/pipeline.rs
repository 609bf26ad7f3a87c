//! End-to-end simulation run
//!
//! Load inputs, post them to the simulator, write the CSV report. Any
//! failure stops the run before the report is touched.

use crate::config::RunConfig;
use crate::dasl::{DaslData, DaslSet, ExchangeError};
use crate::loader::{Inputs, LoadError};
use crate::report::{build_records, write_report, OutputRecord, ReportError};
use crate::simulator::{Simulator, SimulatorError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

/// Errors from any stage of a run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    #[error(transparent)]
    Simulator(#[from] SimulatorError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub request_states: usize,
    pub response_states: usize,
    pub output: PathBuf,
}

/// Build and check the simulation request for a run
pub fn build_request(config: &RunConfig) -> Result<DaslData, PipelineError> {
    let inputs = Inputs::load(config.prices.as_deref(), config.rules.as_deref())?;
    let request = inputs.to_request(config.initial_balance, config.description.as_deref())?;
    request.validate()?;
    Ok(request)
}

/// Flatten a simulation response and write it as CSV
///
/// Every row is built before the file is opened, so a bad state leaves any
/// existing report untouched.
pub fn write_results(
    response: &DaslSet,
    output: &Path,
) -> Result<Vec<OutputRecord>, PipelineError> {
    let records = build_records(response)?;
    write_report(output, &records)?;
    Ok(records)
}

/// Run the whole pipeline against `simulator`
pub async fn run(
    simulator: &dyn Simulator,
    config: &RunConfig,
) -> Result<RunSummary, PipelineError> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("simulation", run_id = %run_id);

    async move {
        let request = build_request(config)?;
        let request_states = request.history.len();
        tracing::info!(
            states = request_states,
            balance = config.initial_balance,
            "Built simulation request"
        );

        let response = simulator.simulate(&request).await?;
        if let Some(state) = response.events.first() {
            for var in &state.values {
                tracing::debug!(value = %var, "First response state");
            }
        }

        if let Some(path) = &config.save_response {
            save_response(&response, path)?;
        }

        write_results(&response, &config.output)?;

        Ok(RunSummary {
            run_id,
            request_states,
            response_states: response.len(),
            output: config.output.clone(),
        })
    }
    .instrument(span)
    .await
}

fn save_response(response: &DaslSet, path: &Path) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(response)?;
    std::fs::write(path, json).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Saved simulation response");
    Ok(())
}
