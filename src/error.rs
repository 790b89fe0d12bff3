//! Parse errors for textual inputs.
//!
//! The matching pipeline itself never fails: missing availability or
//! exhausted quotas are reported as data. Only the edges that turn
//! strings into typed values (times of day, weekdays, time zones) can
//! reject input.

use thiserror::Error;

/// Error raised while parsing caller-supplied text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Time of day not in `HH:mm` form (or out of range).
    #[error("invalid time of day '{0}', expected HH:mm")]
    InvalidTimeOfDay(String),

    /// Unrecognized weekday abbreviation.
    #[error("invalid weekday '{0}'")]
    InvalidWeekday(String),

    /// Unknown IANA time zone name.
    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),
}
