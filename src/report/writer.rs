//! CSV report output

use super::{OutputRecord, ReportError};
use crate::telemetry::{increment_counter, CounterMetric};
use std::path::Path;

/// Report column headers
pub const HEADER: [&str; 8] = [
    "date",
    "price",
    "trade",
    "sterling",
    "ave3",
    "ave9",
    "transact",
    "newbalance",
];

/// Render the report in memory
///
/// The header is written even when there are no rows.
pub fn to_csv_bytes(records: &[OutputRecord]) -> Result<Vec<u8>, ReportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.into_inner()
        .map_err(|e| ReportError::Csv(csv::Error::from(e.into_error())))
}

/// Write the report to `path`, replacing any existing file
pub fn write_report(path: &Path, records: &[OutputRecord]) -> Result<(), ReportError> {
    let bytes = to_csv_bytes(records)?;
    std::fs::write(path, bytes).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    increment_counter(CounterMetric::ReportRows, records.len() as u64);
    tracing::info!(path = %path.display(), rows = records.len(), "Wrote report");
    Ok(())
}
