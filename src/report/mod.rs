//! CSV report of a simulation run
//!
//! Each simulated state becomes one row holding the price, the trade
//! decision, both moving averages and the account figures.

mod record;
mod writer;

pub use record::{
    build_records, OutputRecord, AVERAGE3, AVERAGE9, NEW_BALANCE, PRICE, STERLING, TRADE,
    TRANSACT,
};
pub use writer::{to_csv_bytes, write_report, HEADER};

use crate::dasl::ExchangeError;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required value is absent from a state
    #[error("State at {time_stamp} has no '{name}' value")]
    MissingValue {
        name: String,
        time_stamp: NaiveDateTime,
    },
    /// A known numeric value carries no points
    #[error("Value '{name}' in state at {time_stamp} has no numeric points")]
    NoNumericValue {
        name: String,
        time_stamp: NaiveDateTime,
    },
    /// The state itself is malformed
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    /// CSV encoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Report file could not be written
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
