//! Timestamp encoding for `timeStamp` and `times`
//!
//! Written without an offset (`2020-01-03T00:00:00`). Reading also accepts
//! fractional seconds, bare dates and RFC 3339 offsets, which are normalised
//! to UTC.

use super::ExchangeError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Format a timestamp for the wire
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(WIRE_FORMAT).to_string()
}

/// Parse a wire timestamp
pub fn parse(text: &str) -> Result<NaiveDateTime, ExchangeError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, WIRE_FORMAT) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ExchangeError::InvalidTimestamp(text.to_string()))
}

pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}

/// Nullable list of timestamps, as carried by textual values
pub mod optional_list {
    use super::{format, parse};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        times: &Option<Vec<NaiveDateTime>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match times {
            Some(list) => serializer.collect_seq(list.iter().map(format)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<NaiveDateTime>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Vec<String>>::deserialize(deserializer)?;
        raw.map(|list| {
            list.iter()
                .map(|s| parse(s).map_err(serde::de::Error::custom))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
    }
}
