//! Calendar inputs: busy events and recurring constraints.
//!
//! Events arrive from a calendar-sync collaborator as absolute UTC
//! intervals. Constraints are recurring weekly blocks expressed in local
//! `HH:mm` times and weekday abbreviations.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A calendar event for one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    /// Event identifier (source-specific).
    pub id: String,
    /// Event title. Informational only.
    #[serde(default)]
    pub title: String,
    /// Start instant.
    pub start_time: DateTime<Utc>,
    /// End instant.
    pub end_time: DateTime<Utc>,
    /// Whether the event blocks time. Free/tentative events are ignored.
    #[serde(default = "default_true")]
    pub is_busy: bool,
    /// All-day events block the whole schedulable window of any day whose window they overlap.
    #[serde(default)]
    pub is_all_day: bool,
    /// Originating calendar (e.g. "google", "ics").
    #[serde(default)]
    pub source: String,
}

fn default_true() -> bool {
    true
}

impl CalendarEvent {
    /// Creates a busy, timed event.
    pub fn busy(id: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            start_time,
            end_time,
            is_busy: true,
            is_all_day: false,
            source: String::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Marks the event as all-day.
    pub fn all_day(mut self) -> Self {
        self.is_all_day = true;
        self
    }

    /// Marks the event as not blocking time.
    pub fn free(mut self) -> Self {
        self.is_busy = false;
        self
    }

    /// Sets the source calendar.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Category of a recurring constraint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Sleep,
    Nap,
    Transit,
    Work,
    Custom,
}

/// A recurring weekly block, e.g. "work Mon–Fri 09:00–17:00".
///
/// When `end_time < start_time` the block wraps midnight: on each listed
/// day it covers `[start_time, 24:00)` and `[00:00, end_time)`. Equal
/// times block nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Constraint {
    /// Constraint category.
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    /// Weekdays the block applies to.
    pub days: Vec<Weekday>,
    /// Local start time.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Local end time.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl Constraint {
    /// Builds a constraint from textual weekday abbreviations and `HH:mm` times.
    ///
    /// ```
    /// use u_rendezvous::models::{Constraint, ConstraintKind};
    ///
    /// let work = Constraint::parse(ConstraintKind::Work, &["mon", "tue"], "09:00", "17:00").unwrap();
    /// assert_eq!(work.days.len(), 2);
    /// assert!(Constraint::parse(ConstraintKind::Work, &["mon"], "9am", "17:00").is_err());
    /// ```
    pub fn parse(
        kind: ConstraintKind,
        days: &[&str],
        start_time: &str,
        end_time: &str,
    ) -> Result<Self, ParseError> {
        let days = days
            .iter()
            .map(|d| parse_weekday(d))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            kind,
            days,
            start_time: parse_time_of_day(start_time)?,
            end_time: parse_time_of_day(end_time)?,
        })
    }

    /// Whether the block applies on `weekday`.
    pub fn applies_on(&self, weekday: Weekday) -> bool {
        self.days.contains(&weekday)
    }

    /// Whether the block wraps past midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.end_time < self.start_time
    }
}

/// Parses `HH:mm` (24-hour clock).
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ParseError::InvalidTimeOfDay(s.to_string()))
}

/// Parses a weekday name or abbreviation, case-insensitively.
pub fn parse_weekday(s: &str) -> Result<Weekday, ParseError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| ParseError::InvalidWeekday(s.to_string()))
}

/// Serde adapter for `HH:mm` times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time_of_day(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("07:30").unwrap(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("7").is_err());
        assert_eq!(
            parse_time_of_day("xx:yy").unwrap_err(),
            ParseError::InvalidTimeOfDay("xx:yy".into())
        );
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("mon").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("Sat").unwrap(), Weekday::Sat);
        assert_eq!(parse_weekday("sunday").unwrap(), Weekday::Sun);
        assert!(parse_weekday("funday").is_err());
    }

    #[test]
    fn test_constraint_wrap() {
        let sleep = Constraint::parse(ConstraintKind::Sleep, &["mon"], "23:00", "07:00").unwrap();
        assert!(sleep.wraps_midnight());
        assert!(sleep.applies_on(Weekday::Mon));
        let empty = Constraint::parse(ConstraintKind::Nap, &["mon"], "13:00", "13:00").unwrap();
        assert!(!empty.wraps_midnight());
        assert!(!sleep.applies_on(Weekday::Tue));
    }

    #[test]
    fn test_constraint_json() {
        let json = r#"{"type":"work","days":["Mon","Fri"],"start_time":"09:00","end_time":"17:30"}"#;
        let c: Constraint = serde_json::from_str(json).unwrap();
        assert_eq!(c.kind, ConstraintKind::Work);
        assert_eq!(c.days, vec![Weekday::Mon, Weekday::Fri]);
        assert_eq!(c.end_time, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        let back = serde_json::to_string(&c).unwrap();
        assert!(back.contains("\"start_time\":\"09:00\""));
    }

    #[test]
    fn test_event_defaults() {
        let json = r#"{"id":"e1","start_time":"2024-01-01T10:00:00Z","end_time":"2024-01-01T11:00:00Z"}"#;
        let e: CalendarEvent = serde_json::from_str(json).unwrap();
        assert!(e.is_busy);
        assert!(!e.is_all_day);
    }
}
