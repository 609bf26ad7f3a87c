//! Price table parsing

use super::LoadError;
use crate::dasl::timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;

/// Date layouts seen in exported price tables
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%m/%d/%Y"];

/// One row of the price table
///
/// Only `date` and `price` feed the simulation; the remaining columns are
/// kept as read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Open", default)]
    pub open: String,
    #[serde(rename = "High", default)]
    pub high: String,
    #[serde(rename = "Low", default)]
    pub low: String,
    #[serde(rename = "Change", alias = "Change %", default)]
    pub change: String,
}

/// A price row with its date and price parsed
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub time_stamp: NaiveDateTime,
    pub price: f64,
    /// Price exactly as written in the table
    pub price_text: String,
}

impl PriceRecord {
    /// Parse date and price; `row` is the 1-based data row used in errors
    pub fn to_point(&self, row: usize) -> Result<PricePoint, LoadError> {
        let time_stamp = parse_date(&self.date).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: self.date.clone(),
        })?;

        let price_text = self.price.trim().to_string();
        let price: f64 = price_text
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite())
            .ok_or_else(|| LoadError::InvalidPrice {
                row,
                value: self.price.clone(),
            })?;

        Ok(PricePoint {
            time_stamp,
            price,
            price_text,
        })
    }
}

/// Read every row of a `Date, Price, Open, High, Low, Change` table
pub fn read_prices<R: Read>(reader: R) -> Result<Vec<PriceRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = rdr
        .deserialize()
        .collect::<Result<Vec<PriceRecord>, csv::Error>>()?;

    tracing::debug!(rows = records.len(), "Read price table");
    Ok(records)
}

/// Parse a table date to midnight of that day
///
/// Full timestamps are accepted as-is.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .or_else(|| timestamp::parse(text).ok())
}
