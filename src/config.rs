//! Engine configuration.
//!
//! Every tunable the pipeline consults lives here. Defaults reproduce
//! the stock behavior: a 07:00–22:00 schedulable day in UTC, 60-minute
//! minimum overlaps, and the neutral scoring defaults.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::calendar::hhmm;

/// Configuration shared by the calculator, finder, scorer and negotiator.
///
/// # Example
/// ```
/// use u_rendezvous::config::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_timezone_name("Europe/Berlin")
///     .unwrap()
///     .with_min_overlap_minutes(90);
/// assert_eq!(config.min_overlap_minutes, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Zone used for all local-time reasoning (window, buckets, weekends).
    pub timezone: Tz,
    /// Start of the schedulable day (local, inclusive).
    #[serde(with = "hhmm")]
    pub day_start: NaiveTime,
    /// End of the schedulable day (local, exclusive).
    #[serde(with = "hhmm")]
    pub day_end: NaiveTime,
    /// Shortest overlap worth proposing (minutes).
    pub min_overlap_minutes: i64,
    /// Weekly cap for participants without preferences.
    pub default_weekly_cap: u32,
    /// Busy-event buffer for participants without preferences (minutes).
    pub default_buffer_minutes: i64,
    /// Days since last hangout assumed when the caller has no data.
    pub default_recency_days: f64,
    /// Days at which the recency factor saturates at 1.0.
    pub recency_horizon_days: f64,
    /// Friendship priority assumed for unknown pairs (1–10).
    pub default_friendship_priority: u8,
    /// Travel time at which location convenience reaches 0.0 (minutes).
    pub travel_horizon_minutes: f64,
    /// Constant weather suitability.
    pub weather_score: f64,
}

impl EngineConfig {
    /// Sets the time zone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the time zone from an IANA name such as `"America/New_York"`.
    pub fn with_timezone_name(self, name: &str) -> Result<Self, ParseError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| ParseError::InvalidTimezone(name.to_string()))?;
        Ok(self.with_timezone(tz))
    }

    /// Sets the schedulable day bounds.
    pub fn with_day_bounds(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.day_start = start;
        self.day_end = end;
        self
    }

    /// Sets the minimum overlap duration.
    pub fn with_min_overlap_minutes(mut self, minutes: i64) -> Self {
        self.min_overlap_minutes = minutes;
        self
    }

    /// Sets the weekly cap used for participants without preferences.
    pub fn with_default_weekly_cap(mut self, cap: u32) -> Self {
        self.default_weekly_cap = cap;
        self
    }

    /// Sets the constant weather score.
    pub fn with_weather_score(mut self, score: f64) -> Self {
        self.weather_score = score.clamp(0.0, 1.0);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            day_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            day_end: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            min_overlap_minutes: 60,
            default_weekly_cap: 3,
            default_buffer_minutes: 15,
            default_recency_days: 14.0,
            recency_horizon_days: 30.0,
            default_friendship_priority: 5,
            travel_horizon_minutes: 60.0,
            weather_score: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.timezone, Tz::UTC);
        assert_eq!(c.day_start, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(c.day_end, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert_eq!(c.min_overlap_minutes, 60);
        assert!((c.weather_score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_bad_timezone() {
        let err = EngineConfig::default()
            .with_timezone_name("Mars/Olympus")
            .unwrap_err();
        assert_eq!(err, ParseError::InvalidTimezone("Mars/Olympus".into()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "timezone": "Asia/Seoul", "day_start": "08:30" }"#;
        let c: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.timezone, chrono_tz::Asia::Seoul);
        assert_eq!(c.day_start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(c.day_end, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert_eq!(c.min_overlap_minutes, 60);
    }

    #[test]
    fn test_json_roundtrip() {
        let c = EngineConfig::default().with_min_overlap_minutes(45);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"day_end\":\"22:00\""));
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
