//! Wall-clock conversions for user-requested update times.
//!
//! Update requests name a time of day as `"HH:MM"`; the scheduler works in
//! seconds-from-now. These helpers convert between the two.

use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("time must be formatted as HH:MM, got {0:?}")]
    Format(String),
    #[error("non-numeric component in {input:?}: {source}")]
    Component {
        input: String,
        source: std::num::ParseIntError,
    },
}

#[must_use]
pub fn minutes_to_seconds(minutes: u64) -> u64 {
    minutes * 60
}

#[must_use]
pub fn hours_to_minutes(hours: u64) -> u64 {
    hours * 60
}

/// Convert an `"HH:MM"` string to seconds since midnight.
///
/// The string must split into exactly two colon-separated numeric fields.
/// Components are NOT range-checked: `"99:99"` is accepted and converted
/// arithmetically (359,940 seconds). Callers that want calendar-valid times
/// must validate separately.
///
/// # Errors
///
/// Returns [`ClockError::Format`] when the input does not split into exactly
/// two fields, and [`ClockError::Component`] when a field is not a number.
pub fn hhmm_to_seconds(hhmm: &str) -> Result<u64, ClockError> {
    let parts: Vec<&str> = hhmm.split(':').collect();
    let (hours, minutes) = match parts.as_slice() {
        [h, m] => (*h, *m),
        _ => return Err(ClockError::Format(hhmm.to_owned())),
    };
    let hours: u64 = hours.parse().map_err(|source| ClockError::Component {
        input: hhmm.to_owned(),
        source,
    })?;
    let minutes: u64 = minutes.parse().map_err(|source| ClockError::Component {
        input: hhmm.to_owned(),
        source,
    })?;
    Ok(minutes_to_seconds(hours_to_minutes(hours)) + minutes_to_seconds(minutes))
}

/// Seconds from `now` until the next occurrence of `target` **today**.
///
/// Negative when the target time has already passed today; callers decide
/// what a negative delay means (the update engine treats it as "due on the
/// next poll").
///
/// # Errors
///
/// Returns [`ClockError`] when `target` is malformed.
pub fn seconds_until(target: &str, now: NaiveTime) -> Result<i64, ClockError> {
    let target_secs = hhmm_to_seconds(target)?;
    let now_secs = hhmm_to_seconds(&now.format("%H:%M").to_string())?;
    // Saturate instead of wrapping on absurd (but accepted) inputs.
    Ok(i64::try_from(target_secs).unwrap_or(i64::MAX)
        - i64::try_from(now_secs).unwrap_or(i64::MAX))
}
