//! Price table to time series conversion

use super::prices::PriceRecord;
use super::LoadError;
use crate::dasl::{DarlVar, DaslSet, DaslState};
use chrono::Duration;

/// Name of the per-state price value
pub const PRICE: &str = "price";
/// Name of the opening balance value
pub const BALANCE: &str = "balance";

/// Build the simulation history from price rows
///
/// Rows may arrive in any order; states are sorted by date. Every state
/// carries a crisp `price`, and only the earliest one also carries the
/// opening `balance`. Samples are one day apart.
pub fn build_history(records: &[PriceRecord], initial_balance: f64) -> Result<DaslSet, LoadError> {
    if records.is_empty() {
        return Err(LoadError::EmptyTable);
    }

    let mut points = records
        .iter()
        .enumerate()
        .map(|(i, record)| record.to_point(i + 1))
        .collect::<Result<Vec<_>, _>>()?;
    points.sort_by_key(|p| p.time_stamp);

    let events: Vec<DaslState> = points
        .into_iter()
        .enumerate()
        .map(|(i, point)| {
            let mut values =
                vec![DarlVar::numeric(PRICE, point.price).with_value_text(point.price_text)];
            if i == 0 {
                values.push(DarlVar::numeric(BALANCE, initial_balance));
            }
            DaslState::new(point.time_stamp, values)
        })
        .collect();

    tracing::debug!(
        states = events.len(),
        first = %events[0].time_stamp,
        last = %events[events.len() - 1].time_stamp,
        "Built price history"
    );

    Ok(DaslSet::new(events, Duration::days(1)))
}
