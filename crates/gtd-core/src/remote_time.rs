//! Serde adapter for the task service's timestamp format.
//!
//! The REST API emits creation times as `2006-01-02T15:04:05.000000Z`
//! (microsecond precision, literal `Z`). Use with
//! `#[serde(with = "remote_time")]` on a `DateTime<Utc>` field.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// `strftime` pattern of the remote timestamp format.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Parse a remote timestamp string.
///
/// # Errors
///
/// Returns a `chrono` parse error if `raw` does not match [`FORMAT`].
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, FORMAT).map(|naive| naive.and_utc())
}

/// Render a timestamp in the remote format.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}
