//! Scoring context for factor evaluation.

use std::collections::HashMap;

use chrono_tz::Tz;

use crate::models::{Friendship, UserPrefs};

/// Per-engagement-type scoring state.
///
/// Built once per engagement type by the negotiator; callers scoring
/// slots directly build it with the `with_*` helpers.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    /// Engagement type being scored (e.g. "coffee").
    pub engagement_type: String,
    /// Proposals already counted against each person this week.
    pub weekly_counts: HashMap<String, u32>,
    /// Days since each pair last met, keyed by [`pair_key`].
    pub recency_days: HashMap<String, f64>,
    /// Travel time per person (minutes).
    pub travel_minutes: HashMap<String, f64>,
    /// Zone for hour buckets and weekend detection.
    pub timezone: Tz,
}

impl ScoringContext {
    /// Creates an empty context for an engagement type (UTC).
    pub fn new(engagement_type: impl Into<String>) -> Self {
        Self {
            engagement_type: engagement_type.into(),
            weekly_counts: HashMap::new(),
            recency_days: HashMap::new(),
            travel_minutes: HashMap::new(),
            timezone: Tz::UTC,
        }
    }

    /// Sets the time zone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the weekly proposal count of a person.
    pub fn with_weekly_count(mut self, user_id: impl Into<String>, count: u32) -> Self {
        self.weekly_counts.insert(user_id.into(), count);
        self
    }

    /// Sets days since two people last met.
    pub fn with_recency(mut self, a: &str, b: &str, days: f64) -> Self {
        self.recency_days.insert(pair_key(a, b), days);
        self
    }

    /// Sets the travel time of a person.
    pub fn with_travel_minutes(mut self, user_id: impl Into<String>, minutes: f64) -> Self {
        self.travel_minutes.insert(user_id.into(), minutes);
        self
    }

    /// Replaces the whole recency map.
    pub fn with_recency_map(mut self, recency_days: HashMap<String, f64>) -> Self {
        self.recency_days = recency_days;
        self
    }

    /// Replaces the whole travel map.
    pub fn with_travel_map(mut self, travel_minutes: HashMap<String, f64>) -> Self {
        self.travel_minutes = travel_minutes;
        self
    }
}

/// Everything a factor may look at besides the slot itself.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInputs<'a> {
    pub prefs: &'a HashMap<String, UserPrefs>,
    pub friendships: &'a [Friendship],
    pub context: &'a ScoringContext,
}

impl<'a> ScoringInputs<'a> {
    pub fn new(
        prefs: &'a HashMap<String, UserPrefs>,
        friendships: &'a [Friendship],
        context: &'a ScoringContext,
    ) -> Self {
        Self {
            prefs,
            friendships,
            context,
        }
    }

    /// Preferences of a person, if known.
    pub fn prefs_for(&self, user_id: &str) -> Option<&'a UserPrefs> {
        self.prefs.get(user_id)
    }

    /// Priority of the friendship between two people, if an edge exists
    /// in either direction.
    pub fn friendship_priority(&self, a: &str, b: &str) -> Option<u8> {
        self.friendships
            .iter()
            .find(|f| f.connects(a, b))
            .map(|f| f.priority)
    }
}

/// Order-independent key for a pair of people.
///
/// ```
/// use u_rendezvous::scoring::pair_key;
/// assert_eq!(pair_key("bob", "amy"), pair_key("amy", "bob"));
/// assert_eq!(pair_key("bob", "amy"), "amy:bob");
/// ```
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}

/// Every unordered pair of participants, in list order.
pub fn participant_pairs(ids: &[String]) -> impl Iterator<Item = (&str, &str)> + '_ {
    ids.iter().enumerate().flat_map(move |(i, a)| {
        ids[i + 1..]
            .iter()
            .map(move |b| (a.as_str(), b.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs() {
        let ids: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let pairs: Vec<_> = participant_pairs(&ids).collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
        assert_eq!(participant_pairs(&ids[..1]).count(), 0);
    }

    #[test]
    fn test_friendship_lookup() {
        let prefs = HashMap::new();
        let friends = vec![Friendship::new("amy", "bob", 9)];
        let ctx = ScoringContext::new("coffee");
        let inputs = ScoringInputs::new(&prefs, &friends, &ctx);
        assert_eq!(inputs.friendship_priority("bob", "amy"), Some(9));
        assert_eq!(inputs.friendship_priority("amy", "cat"), None);
    }

    #[test]
    fn test_context_builders() {
        let ctx = ScoringContext::new("dinner")
            .with_weekly_count("amy", 2)
            .with_recency("bob", "amy", 3.0)
            .with_travel_minutes("amy", 20.0);
        assert_eq!(ctx.weekly_counts["amy"], 2);
        assert_eq!(ctx.recency_days["amy:bob"], 3.0);
        assert_eq!(ctx.travel_minutes["amy"], 20.0);
    }
}
