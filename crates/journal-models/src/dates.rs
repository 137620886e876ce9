//! Date fields accepted on request bodies.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Reads either a calendar date (`2026-06-10`) or an RFC 3339 timestamp
/// (`2026-06-10T00:00:00Z`). Timestamps keep the date as written, in their
/// own offset.
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD or RFC 3339", raw))
}
