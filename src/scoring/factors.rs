//! Built-in scoring factors.
//!
//! # Defaults
//! Missing inputs never fail a score; each factor falls back to a
//! documented neutral value (usually 0.5).
//!
//! # Score Convention
//! All factors return values in `[0, 1]`, higher = more desirable.

use chrono::{Datelike, Timelike, Weekday};

use super::{participant_pairs, pair_key, FactorValue, ScoringFactor, ScoringInputs};
use crate::models::OverlapSlot;

const NEUTRAL: f64 = 0.5;

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ======================== Time-of-day ========================

/// Part of the day a slot starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    /// 07:00–12:00
    Morning,
    /// 12:00–17:00
    Afternoon,
    /// 17:00–22:00
    Evening,
}

impl DayPart {
    /// Bucket for a local hour; `None` outside 07:00–22:00.
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            7..=11 => Some(Self::Morning),
            12..=16 => Some(Self::Afternoon),
            17..=21 => Some(Self::Evening),
            _ => None,
        }
    }
}

/// Match between the slot's part of day and each participant's stated
/// time preferences.
///
/// Per participant: 1.0 when the bucket matches an enabled flag, else 0.3;
/// +0.3 (capped at 1.0) on weekends for weekend-lovers. Unknown
/// preferences count as 0.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimePreference;

impl ScoringFactor for TimePreference {
    fn name(&self) -> &'static str {
        "time_preference"
    }

    fn evaluate(&self, slot: &OverlapSlot, inputs: &ScoringInputs<'_>) -> FactorValue {
        let local = slot.start.with_timezone(&inputs.context.timezone);
        let part = DayPart::from_hour(local.hour());
        let weekend = matches!(local.weekday(), Weekday::Sat | Weekday::Sun);

        mean(slot.participant_ids.iter().map(|id| {
            let Some(p) = inputs.prefs_for(id) else {
                return NEUTRAL;
            };
            let matched = match part {
                Some(DayPart::Morning) => p.prefer_mornings,
                Some(DayPart::Afternoon) => p.prefer_afternoons,
                Some(DayPart::Evening) => p.prefer_evenings,
                None => false,
            };
            let mut value = if matched { 1.0 } else { 0.3 };
            if weekend && p.prefer_weekends {
                value = (value + 0.3_f64).min(1.0);
            }
            value
        }))
        .unwrap_or(NEUTRAL)
    }

    fn description(&self) -> &'static str {
        "Time-of-day and weekend preference match"
    }
}

// ======================== Activity ========================

/// Whether participants list the engagement type among their favorites.
///
/// 1.0 if listed, 0.2 if the list is non-empty and excludes it, 0.5 when
/// the list is empty or preferences are unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventTypeFit;

impl ScoringFactor for EventTypeFit {
    fn name(&self) -> &'static str {
        "event_type_fit"
    }

    fn evaluate(&self, slot: &OverlapSlot, inputs: &ScoringInputs<'_>) -> FactorValue {
        let kind = inputs.context.engagement_type.as_str();
        mean(slot.participant_ids.iter().map(|id| match inputs.prefs_for(id) {
            Some(p) if p.preferred_types.is_empty() => NEUTRAL,
            Some(p) if p.likes(kind) => 1.0,
            Some(_) => 0.2,
            None => NEUTRAL,
        }))
        .unwrap_or(NEUTRAL)
    }

    fn description(&self) -> &'static str {
        "Engagement type preference match"
    }
}

// ======================== Location ========================

/// Travel burden: `max(0, 1 − minutes / horizon)` per participant.
///
/// With no travel data at all the factor is a flat 0.5; participants
/// missing from a non-empty travel map also count as 0.5.
#[derive(Debug, Clone, Copy)]
pub struct LocationConvenience {
    pub horizon_minutes: f64,
}

impl Default for LocationConvenience {
    fn default() -> Self {
        Self {
            horizon_minutes: 60.0,
        }
    }
}

impl ScoringFactor for LocationConvenience {
    fn name(&self) -> &'static str {
        "location_convenience"
    }

    fn evaluate(&self, slot: &OverlapSlot, inputs: &ScoringInputs<'_>) -> FactorValue {
        let travel = &inputs.context.travel_minutes;
        if travel.is_empty() || self.horizon_minutes <= 0.0 {
            return NEUTRAL;
        }
        mean(slot.participant_ids.iter().map(|id| match travel.get(id) {
            Some(minutes) => (1.0 - minutes / self.horizon_minutes).max(0.0),
            None => NEUTRAL,
        }))
        .unwrap_or(NEUTRAL)
    }

    fn description(&self) -> &'static str {
        "Travel time convenience"
    }
}

// ======================== Social ========================

/// Closeness of the group: mean of `(priority − 1) / 9` over every pair.
///
/// Unknown pairs use `default_priority`.
#[derive(Debug, Clone, Copy)]
pub struct PriorityContact {
    pub default_priority: u8,
}

impl Default for PriorityContact {
    fn default() -> Self {
        Self {
            default_priority: 5,
        }
    }
}

impl PriorityContact {
    fn rescale(priority: u8) -> f64 {
        (f64::from(priority.clamp(1, 10)) - 1.0) / 9.0
    }
}

impl ScoringFactor for PriorityContact {
    fn name(&self) -> &'static str {
        "priority_contact"
    }

    fn evaluate(&self, slot: &OverlapSlot, inputs: &ScoringInputs<'_>) -> FactorValue {
        mean(participant_pairs(&slot.participant_ids).map(|(a, b)| {
            let priority = inputs
                .friendship_priority(a, b)
                .unwrap_or(self.default_priority);
            Self::rescale(priority)
        }))
        .unwrap_or_else(|| Self::rescale(self.default_priority))
    }

    fn description(&self) -> &'static str {
        "Friendship priority of the group"
    }
}

/// Time since the group last met: mean over pairs of
/// `min(days / horizon, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct Recency {
    pub default_days: f64,
    pub horizon_days: f64,
}

impl Default for Recency {
    fn default() -> Self {
        Self {
            default_days: 14.0,
            horizon_days: 30.0,
        }
    }
}

impl Recency {
    fn scale(&self, days: f64) -> f64 {
        if self.horizon_days <= 0.0 {
            return 1.0;
        }
        (days / self.horizon_days).clamp(0.0, 1.0)
    }
}

impl ScoringFactor for Recency {
    fn name(&self) -> &'static str {
        "recency"
    }

    fn evaluate(&self, slot: &OverlapSlot, inputs: &ScoringInputs<'_>) -> FactorValue {
        let recency = &inputs.context.recency_days;
        mean(participant_pairs(&slot.participant_ids).map(|(a, b)| {
            let days = recency
                .get(&pair_key(a, b))
                .copied()
                .unwrap_or(self.default_days);
            self.scale(days)
        }))
        .unwrap_or_else(|| self.scale(self.default_days))
    }

    fn description(&self) -> &'static str {
        "Days since the group last met"
    }
}

// ======================== Quota ========================

/// Remaining weekly quota: mean of `(cap − count) / cap`, clamped.
///
/// A cap of zero scores 0.0.
#[derive(Debug, Clone, Copy)]
pub struct CapDistance {
    pub default_cap: u32,
}

impl Default for CapDistance {
    fn default() -> Self {
        Self { default_cap: 3 }
    }
}

impl ScoringFactor for CapDistance {
    fn name(&self) -> &'static str {
        "cap_distance"
    }

    fn evaluate(&self, slot: &OverlapSlot, inputs: &ScoringInputs<'_>) -> FactorValue {
        mean(slot.participant_ids.iter().map(|id| {
            let cap = inputs
                .prefs_for(id)
                .map(|p| p.max_events_per_week)
                .unwrap_or(self.default_cap);
            if cap == 0 {
                return 0.0;
            }
            let used = inputs.context.weekly_counts.get(id).copied().unwrap_or(0);
            ((f64::from(cap) - f64::from(used)) / f64::from(cap)).clamp(0.0, 1.0)
        }))
        .unwrap_or(NEUTRAL)
    }

    fn description(&self) -> &'static str {
        "Remaining weekly quota"
    }
}

// ======================== Weather ========================

/// Weather suitability. The stock implementation is a constant; swap in
/// a forecast-backed factor with [`SlotScorer::replace_factor`].
///
/// [`SlotScorer::replace_factor`]: super::SlotScorer::replace_factor
#[derive(Debug, Clone, Copy)]
pub struct WeatherSuitability {
    pub score: f64,
}

impl Default for WeatherSuitability {
    fn default() -> Self {
        Self { score: 0.7 }
    }
}

impl ScoringFactor for WeatherSuitability {
    fn name(&self) -> &'static str {
        "weather_suitability"
    }

    fn evaluate(&self, _slot: &OverlapSlot, _inputs: &ScoringInputs<'_>) -> FactorValue {
        self.score
    }

    fn description(&self) -> &'static str {
        "Weather suitability (constant)"
    }
}
