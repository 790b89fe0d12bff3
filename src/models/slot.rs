//! Free, overlap and scored slots.
//!
//! These flow up the pipeline in order: the calculator emits
//! [`FreeSlot`]s per person, the finder combines them into
//! [`OverlapSlot`]s, and the scorer wraps those into [`ScoredSlot`]s.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// A contiguous interval where one person has no recorded conflict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub owner_id: String,
}

impl FreeSlot {
    /// Creates a free slot.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, owner_id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            owner_id: owner_id.into(),
        }
    }

    /// The slot as a bare interval.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.window().duration_minutes()
    }
}

/// (engagement type, sorted participant ids).
pub type GroupKey = (String, Vec<String>);

/// An interval where two or more people are simultaneously free.
///
/// `participant_ids` keeps discovery order; the first id is treated as
/// the initiator when titles are built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverlapSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub participant_ids: Vec<String>,
}

impl OverlapSlot {
    /// Creates an overlap slot.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, participant_ids: Vec<String>) -> Self {
        Self {
            start,
            end,
            participant_ids,
        }
    }

    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.window().duration_minutes()
    }

    /// Whether `user_id` takes part in this slot.
    pub fn contains_participant(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|p| p == user_id)
    }

    /// Participant ids in lexicographic order.
    pub fn sorted_participants(&self) -> Vec<String> {
        let mut ids = self.participant_ids.clone();
        ids.sort();
        ids
    }

    /// Composite group key: engagement type plus sorted participant ids.
    pub fn group_key(&self, engagement_type: &str) -> GroupKey {
        (engagement_type.to_string(), self.sorted_participants())
    }
}

/// An overlap slot with its desirability score for one engagement type.
///
/// `breakdown` maps each factor name to its weighted contribution; the
/// contributions sum to `score` up to rounding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredSlot {
    #[serde(flatten)]
    pub slot: OverlapSlot,
    pub score: f64,
    pub breakdown: BTreeMap<String, f64>,
}

impl ScoredSlot {
    /// Sum of the breakdown contributions.
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.values().sum()
    }
}
