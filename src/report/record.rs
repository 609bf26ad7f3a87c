//! Response states to report rows

use super::ReportError;
use crate::dasl::{timestamp, DarlVar, DaslSet, DaslState};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

pub const PRICE: &str = "price";
pub const STERLING: &str = "sterling";
pub const AVERAGE3: &str = "tradingrules.average3";
pub const AVERAGE9: &str = "tradingrules.average9";
pub const NEW_BALANCE: &str = "newbalance";
pub const TRADE: &str = "trade";
pub const TRANSACT: &str = "tradingsim.transact";

/// One report row; field order is column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    #[serde(serialize_with = "timestamp::serialize")]
    pub date: NaiveDateTime,
    pub price: f64,
    pub trade: String,
    pub sterling: f64,
    pub ave3: f64,
    pub ave9: f64,
    pub transact: String,
    pub newbalance: f64,
}

impl OutputRecord {
    /// Flatten one simulated state
    pub fn from_state(state: &DaslState) -> Result<Self, ReportError> {
        let values = state.value_map()?;
        let lookup = Lookup {
            values: &values,
            time_stamp: state.time_stamp,
        };

        Ok(Self {
            date: state.time_stamp,
            price: lookup.numeric(PRICE)?,
            trade: lookup.require(TRADE)?.value.clone(),
            sterling: lookup.numeric(STERLING)?,
            ave3: lookup.numeric(AVERAGE3)?,
            ave9: lookup.numeric(AVERAGE9)?,
            transact: lookup.require(TRANSACT)?.value.clone(),
            newbalance: lookup.numeric(NEW_BALANCE)?,
        })
    }
}

struct Lookup<'a> {
    values: &'a HashMap<&'a str, &'a DarlVar>,
    time_stamp: NaiveDateTime,
}

impl<'a> Lookup<'a> {
    fn require(&self, name: &str) -> Result<&'a DarlVar, ReportError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ReportError::MissingValue {
                name: name.to_string(),
                time_stamp: self.time_stamp,
            })
    }

    /// Central point of a numeric value, 0.0 when unknown
    fn numeric(&self, name: &str) -> Result<f64, ReportError> {
        let var = self.require(name)?;
        if var.unknown {
            return Ok(0.0);
        }
        var.central().ok_or_else(|| ReportError::NoNumericValue {
            name: name.to_string(),
            time_stamp: self.time_stamp,
        })
    }
}

/// Flatten every state, preserving order
///
/// The first state that cannot be flattened aborts the whole conversion.
pub fn build_records(set: &DaslSet) -> Result<Vec<OutputRecord>, ReportError> {
    set.events.iter().map(OutputRecord::from_state).collect()
}
