//! `TimeSpan` text encoding for `sampleTime`
//!
//! The simulation service reads durations as `[-][d.]hh:mm:ss[.fffffff]`,
//! where the optional fraction is in 100ns ticks. One day is `1.00:00:00`.

use super::ExchangeError;
use chrono::Duration;
use serde::{Deserialize, Deserializer, Serializer};

const SECS_PER_DAY: i64 = 86_400;
const NANOS_PER_TICK: i32 = 100;
const TICK_DIGITS: usize = 7;
// Largest whole day count a TimeSpan can hold
const MAX_DAYS: i64 = 10_675_199;

/// Format a duration in `TimeSpan` form
pub fn format(duration: &Duration) -> String {
    let negative = *duration < Duration::zero();
    let abs = if negative { -*duration } else { *duration };

    let total_secs = abs.num_seconds();
    let days = total_secs / SECS_PER_DAY;
    let hours = (total_secs % SECS_PER_DAY) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    let ticks = abs.subsec_nanos() / NANOS_PER_TICK;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        out.push_str(&format!(".{:07}", ticks));
    }
    out
}

/// Parse a `TimeSpan` string
///
/// A bare integer is read as a number of days.
pub fn parse(text: &str) -> Result<Duration, ExchangeError> {
    let invalid = || ExchangeError::InvalidTimeSpan(text.to_string());

    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if body.is_empty() {
        return Err(invalid());
    }

    let parts: Vec<&str> = body.split(':').collect();
    let duration = match parts.as_slice() {
        [days] => Duration::days(parse_unit(days, MAX_DAYS)?),
        [day_hours, minutes, seconds] => {
            let (days, hours) = match day_hours.split_once('.') {
                Some((d, h)) => (parse_unit(d, MAX_DAYS)?, parse_unit(h, 23)?),
                None => (0, parse_unit(day_hours, 23)?),
            };
            let minutes = parse_unit(minutes, 59)?;
            let (seconds, ticks) = match seconds.split_once('.') {
                Some((s, fraction)) => (parse_unit(s, 59)?, parse_ticks(fraction)?),
                None => (parse_unit(seconds, 59)?, 0),
            };

            Duration::days(days)
                + Duration::hours(hours)
                + Duration::minutes(minutes)
                + Duration::seconds(seconds)
                + Duration::nanoseconds(ticks * NANOS_PER_TICK as i64)
        }
        _ => return Err(invalid()),
    };

    Ok(if negative { -duration } else { duration })
}

fn parse_unit(text: &str, max: i64) -> Result<i64, ExchangeError> {
    let value: i64 = text
        .parse()
        .map_err(|_| ExchangeError::InvalidTimeSpan(text.to_string()))?;
    if value < 0 || value > max {
        return Err(ExchangeError::InvalidTimeSpan(text.to_string()));
    }
    Ok(value)
}

fn parse_ticks(fraction: &str) -> Result<i64, ExchangeError> {
    if fraction.is_empty()
        || fraction.len() > TICK_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ExchangeError::InvalidTimeSpan(fraction.to_string()));
    }
    let padded = format!("{:0<width$}", fraction, width = TICK_DIGITS);
    padded
        .parse()
        .map_err(|_| ExchangeError::InvalidTimeSpan(fraction.to_string()))
}

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(duration))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}
