//! Negotiation inputs and outputs.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    CalendarEvent, Constraint, Friendship, LocationEntry, NegotiationLog, ProposalCandidate,
    UserPrefs,
};

/// Calendar inputs for one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantInput {
    pub user_id: String,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl ParticipantInput {
    /// Creates a participant with an empty calendar.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            events: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Adds a calendar event.
    pub fn with_event(mut self, event: CalendarEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Adds a recurring constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// Everything a single negotiation run looks at.
///
/// Participants are listed in the log in input order; overlaps are
/// computed in user-id order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NegotiationParams {
    pub participants: Vec<ParticipantInput>,
    #[serde(default)]
    pub prefs: HashMap<String, UserPrefs>,
    #[serde(default)]
    pub friendships: Vec<Friendship>,
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
    /// First day of the negotiation week.
    pub week_start: NaiveDate,
    /// Engagement types to consider, in priority order for ties.
    pub engagement_types: Vec<String>,
    /// Days since each pair last met, keyed by [`pair_key`](crate::scoring::pair_key).
    #[serde(default)]
    pub recency_days: HashMap<String, f64>,
}

impl NegotiationParams {
    /// Creates parameters for a week with no participants yet.
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            participants: Vec::new(),
            prefs: HashMap::new(),
            friendships: Vec::new(),
            locations: Vec::new(),
            week_start,
            engagement_types: Vec::new(),
            recency_days: HashMap::new(),
        }
    }

    pub fn with_participant(mut self, participant: ParticipantInput) -> Self {
        self.participants.push(participant);
        self
    }

    pub fn with_prefs(mut self, user_id: impl Into<String>, prefs: UserPrefs) -> Self {
        self.prefs.insert(user_id.into(), prefs);
        self
    }

    pub fn with_friendship(mut self, friendship: Friendship) -> Self {
        self.friendships.push(friendship);
        self
    }

    pub fn with_location(mut self, location: LocationEntry) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_engagement_type(mut self, engagement_type: impl Into<String>) -> Self {
        self.engagement_types.push(engagement_type.into());
        self
    }

    pub fn with_recency(mut self, a: &str, b: &str, days: f64) -> Self {
        self.recency_days.insert(crate::scoring::pair_key(a, b), days);
        self
    }
}

/// Result of a negotiation run.
///
/// An empty proposal list is a normal outcome; the log says why.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NegotiationOutcome {
    pub proposals: Vec<ProposalCandidate>,
    pub log: NegotiationLog,
}
