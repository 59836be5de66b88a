//! Datetime serialization/deserialization helpers.
//!
//! Provides custom Serde serialization/deserialization support:
//! - Serialization: `DateTime<Utc>` -> RFC3339 string in UTC, `Z` suffix, with
//!   only as many fractional digits as the value needs
//! - Deserialization: any RFC3339 string -> `DateTime<Utc>`
//!
//! File-time values carry 100 ns precision, so the output keeps up to seven
//! fractional digits and reading it back yields the same instant.
//!
//! Years outside 0000-9999 are written with a sign and more than four digits
//! (`+30828-09-14T02:48:05.4775807Z`). RFC3339 has no such form, so reading
//! falls back to an extended-year parse for `Z`-suffixed values.

use chrono::{DateTime, NaiveDateTime, ParseError, Utc};

const EXTENDED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
use serde::{Deserialize, Deserializer, Serializer};

/// Formats `dt` the way it is written to JSON.
#[must_use]
pub fn format(dt: &DateTime<Utc>) -> String {
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = dt.timestamp_subsec_nanos();
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push('Z');
    out
}

/// Parses the text written by [`format`], or any RFC3339 string.
pub fn parse(s: &str) -> Result<DateTime<Utc>, ParseError> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => s
            .strip_suffix('Z')
            .and_then(|naive| NaiveDateTime::parse_from_str(naive, EXTENDED_FORMAT).ok())
            .map(|naive| naive.and_utc())
            .ok_or(e),
    }
}

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

/// Deserializes `DateTime<Utc>` from RFC3339, normalising the offset to UTC.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}")))
}
