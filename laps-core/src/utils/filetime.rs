//! Windows file-time conversion.
//!
//! A file time counts 100-nanosecond ticks since 1601-01-01T00:00:00Z. Active
//! Directory stores `ms-Mcs-AdmPwdExpirationTime` in this form.

use chrono::{DateTime, Utc};

/// Ticks per second.
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Ticks between 1601-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

/// Converts a file time to a UTC timestamp.
///
/// Returns `None` for negative values.
#[must_use]
pub fn to_datetime(ticks: i64) -> Option<DateTime<Utc>> {
    if ticks < 0 {
        return None;
    }
    let unix_ticks = ticks - UNIX_EPOCH_TICKS;
    let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
    let nanos = u32::try_from(unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100).ok()?;
    DateTime::from_timestamp(secs, nanos)
}
