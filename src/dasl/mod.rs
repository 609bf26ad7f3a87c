//! DASL exchange format
//!
//! The JSON document exchanged with the DaslSimulate service: a rule script
//! plus a time series of states, each holding named fuzzy values.

pub mod timespan;
pub mod timestamp;
mod types;

pub use types::{DarlVar, DaslData, DaslSet, DaslState, DataType, FuzzyShape};

use chrono::NaiveDateTime;
use thiserror::Error;

/// Exchange format errors
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Request history has no states
    #[error("History contains no states")]
    EmptyHistory,
    /// Two values in one state share a name
    #[error("Duplicate value '{name}' in state at {time_stamp}")]
    DuplicateValue {
        name: String,
        time_stamp: NaiveDateTime,
    },
    /// A value breaks its data type's invariants
    #[error("Invalid value '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
    /// Unparseable sample time
    #[error("Invalid time span: {0}")]
    InvalidTimeSpan(String),
    /// Unparseable time stamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
