//! Input loading
//!
//! Turns the price table and DARL rule script into a simulation request.
//! Both inputs are compiled into the binary and can be swapped for files
//! on disk.

mod history;
mod prices;

pub use history::{build_history, BALANCE, PRICE};
pub use prices::{parse_date, read_prices, PricePoint, PriceRecord};

use crate::dasl::DaslData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bundled GBP/USD daily price table, newest row first
pub const BUNDLED_PRICES: &str = include_str!("../../resources/GBP_USD.csv");
/// Bundled trading simulation rule set
pub const BUNDLED_RULES: &str = include_str!("../../resources/trading_simulation.darl");

/// Input loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Price table is not valid CSV for the expected columns
    #[error("Price table error: {0}")]
    Csv(#[from] csv::Error),
    /// Price table has no rows
    #[error("Price table has no rows")]
    EmptyTable,
    /// Rule script is blank
    #[error("Rule script is empty")]
    EmptyScript,
    /// Unparseable date
    #[error("Invalid date '{value}' in row {row}")]
    InvalidDate { row: usize, value: String },
    /// Unparseable or non-finite price
    #[error("Invalid price '{value}' in row {row}")]
    InvalidPrice { row: usize, value: String },
}

/// Raw text of the two simulation inputs
#[derive(Debug, Clone)]
pub struct Inputs {
    pub prices: String,
    pub rules: String,
}

impl Inputs {
    /// The inputs compiled into the binary
    pub fn bundled() -> Self {
        Self {
            prices: BUNDLED_PRICES.to_string(),
            rules: BUNDLED_RULES.to_string(),
        }
    }

    /// Bundled inputs, each optionally replaced by a file
    pub fn load(prices: Option<&Path>, rules: Option<&Path>) -> Result<Self, LoadError> {
        let mut inputs = Self::bundled();
        if let Some(path) = prices {
            inputs.prices = read_file(path)?;
        }
        if let Some(path) = rules {
            inputs.rules = read_file(path)?;
        }
        Ok(inputs)
    }

    /// Build the simulation request
    pub fn to_request(
        &self,
        initial_balance: f64,
        description: Option<&str>,
    ) -> Result<DaslData, LoadError> {
        if self.rules.trim().is_empty() {
            return Err(LoadError::EmptyScript);
        }

        let records = read_prices(self.prices.as_bytes())?;
        let mut history = build_history(&records, initial_balance)?;
        if let Some(text) = description {
            history = history.with_description(text);
        }

        Ok(DaslData::new(self.rules.clone(), history))
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    tracing::debug!(path = %path.display(), "Reading input file");
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
