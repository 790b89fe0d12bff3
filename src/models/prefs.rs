//! Per-person preferences and social/location inputs.

use serde::{Deserialize, Serialize};

/// Scheduling preferences of one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserPrefs {
    /// Maximum proposals this person should receive per week.
    pub max_events_per_week: u32,
    /// Engagement types the person likes (e.g. "coffee", "dinner").
    pub preferred_types: Vec<String>,
    /// Padding added around each busy event (minutes).
    pub buffer_minutes: i64,
    pub prefer_mornings: bool,
    pub prefer_afternoons: bool,
    pub prefer_evenings: bool,
    pub prefer_weekends: bool,
    /// Carried through for a real weather factor; the stock stub ignores it.
    pub weather_sensitive: bool,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            max_events_per_week: 3,
            preferred_types: Vec::new(),
            buffer_minutes: 15,
            prefer_mornings: false,
            prefer_afternoons: false,
            prefer_evenings: false,
            prefer_weekends: false,
            weather_sensitive: false,
        }
    }
}

impl UserPrefs {
    /// Sets the weekly cap.
    pub fn with_max_events_per_week(mut self, max: u32) -> Self {
        self.max_events_per_week = max;
        self
    }

    /// Adds a preferred engagement type.
    pub fn with_preferred_type(mut self, kind: impl Into<String>) -> Self {
        self.preferred_types.push(kind.into());
        self
    }

    /// Sets the busy-event buffer.
    pub fn with_buffer_minutes(mut self, minutes: i64) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    pub fn preferring_mornings(mut self) -> Self {
        self.prefer_mornings = true;
        self
    }

    pub fn preferring_afternoons(mut self) -> Self {
        self.prefer_afternoons = true;
        self
    }

    pub fn preferring_evenings(mut self) -> Self {
        self.prefer_evenings = true;
        self
    }

    pub fn preferring_weekends(mut self) -> Self {
        self.prefer_weekends = true;
        self
    }

    /// Whether `kind` is among the preferred types (exact match).
    pub fn likes(&self, kind: &str) -> bool {
        self.preferred_types.iter().any(|t| t == kind)
    }
}

/// A directed friendship edge with a closeness priority (1–10).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Friendship {
    pub user_id: String,
    pub friend_id: String,
    pub priority: u8,
}

impl Friendship {
    /// Creates a friendship edge.
    pub fn new(user_id: impl Into<String>, friend_id: impl Into<String>, priority: u8) -> Self {
        Self {
            user_id: user_id.into(),
            friend_id: friend_id.into(),
            priority,
        }
    }

    /// Whether this edge connects `a` and `b`, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.user_id == a && self.friend_id == b) || (self.user_id == b && self.friend_id == a)
    }
}

/// A place a person frequents, with travel time from their base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationEntry {
    pub user_id: String,
    pub location_name: String,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub travel_minutes: Option<f64>,
}

impl LocationEntry {
    /// Creates a location entry without travel data.
    pub fn new(user_id: impl Into<String>, location_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            location_name: location_name.into(),
            location_id: None,
            travel_minutes: None,
        }
    }

    /// Sets the location id.
    pub fn with_location_id(mut self, id: impl Into<String>) -> Self {
        self.location_id = Some(id.into());
        self
    }

    /// Sets the travel time.
    pub fn with_travel_minutes(mut self, minutes: f64) -> Self {
        self.travel_minutes = Some(minutes);
        self
    }
}
