//! Weighted slot scorer.
//!
//! Holds an ordered table of (factor, weight) pairs. Each factor value is
//! clamped to `[0, 1]`, multiplied by its weight, and stored in the
//! breakdown under the factor name; the score is the breakdown total
//! rounded to four decimals.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::factors::{
    CapDistance, EventTypeFit, LocationConvenience, PriorityContact, Recency, TimePreference,
    WeatherSuitability,
};
use super::{ScoringContext, ScoringFactor, ScoringInputs};
use crate::config::EngineConfig;
use crate::models::{Friendship, OverlapSlot, ScoredSlot, UserPrefs};

#[derive(Clone)]
struct WeightedFactor {
    factor: Arc<dyn ScoringFactor>,
    weight: f64,
}

/// Multi-factor slot scorer.
///
/// # Example
/// ```
/// use u_rendezvous::scoring::SlotScorer;
///
/// let scorer = SlotScorer::standard();
/// assert!((scorer.total_weight() - 1.0).abs() < 1e-12);
/// assert_eq!(scorer.factor_names()[0], "time_preference");
/// ```
#[derive(Clone)]
pub struct SlotScorer {
    factors: Vec<WeightedFactor>,
}

impl SlotScorer {
    /// Creates an empty scorer.
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// The seven stock factors with default parameters.
    pub fn standard() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// The seven stock factors parameterized from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new()
            .with_factor(TimePreference, 0.25)
            .with_factor(EventTypeFit, 0.20)
            .with_factor(
                LocationConvenience {
                    horizon_minutes: config.travel_horizon_minutes,
                },
                0.15,
            )
            .with_factor(
                PriorityContact {
                    default_priority: config.default_friendship_priority,
                },
                0.15,
            )
            .with_factor(
                WeatherSuitability {
                    score: config.weather_score,
                },
                0.10,
            )
            .with_factor(
                Recency {
                    default_days: config.default_recency_days,
                    horizon_days: config.recency_horizon_days,
                },
                0.10,
            )
            .with_factor(
                CapDistance {
                    default_cap: config.default_weekly_cap,
                },
                0.05,
            )
    }

    /// Appends a weighted factor.
    ///
    /// Weights need not sum to 1.0; when their total exceeds 1.0,
    /// [`score_slot`](Self::score_slot) rescales them so the score stays in `[0, 1]`.
    pub fn with_factor<F: ScoringFactor + 'static>(mut self, factor: F, weight: f64) -> Self {
        self.factors.push(WeightedFactor {
            factor: Arc::new(factor),
            weight,
        });
        self
    }

    /// Replaces the factor with the same name, keeping its weight.
    ///
    /// Unknown names leave the scorer unchanged.
    pub fn replace_factor<F: ScoringFactor + 'static>(mut self, factor: F) -> Self {
        let name = factor.name();
        if let Some(slot) = self.factors.iter_mut().find(|w| w.factor.name() == name) {
            slot.factor = Arc::new(factor);
        }
        self
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.factors.iter().map(|w| w.weight).sum()
    }

    /// Factor names in table order.
    pub fn factor_names(&self) -> Vec<&'static str> {
        self.factors.iter().map(|w| w.factor.name()).collect()
    }

    /// Scores one slot for the context's engagement type.
    pub fn score_slot(
        &self,
        slot: &OverlapSlot,
        prefs: &HashMap<String, UserPrefs>,
        friendships: &[Friendship],
        context: &ScoringContext,
    ) -> ScoredSlot {
        let inputs = ScoringInputs::new(prefs, friendships, context);
        let total: f64 = self.factors.iter().map(|w| w.weight.max(0.0)).sum();
        let scale = if total > 1.0 { 1.0 / total } else { 1.0 };

        let breakdown: BTreeMap<String, f64> = self
            .factors
            .iter()
            .map(|w| {
                let raw = w.factor.evaluate(slot, &inputs);
                // NaN or infinite inputs score nothing.
                let value = if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 };
                (w.factor.name().to_string(), value * w.weight.max(0.0) * scale)
            })
            .collect();

        let score = round4(breakdown.values().sum());
        ScoredSlot {
            slot: slot.clone(),
            score,
            breakdown,
        }
    }

    /// Scores every slot and sorts by score, highest first.
    ///
    /// Equal scores keep their input order.
    pub fn rank_slots(
        &self,
        slots: &[OverlapSlot],
        prefs: &HashMap<String, UserPrefs>,
        friendships: &[Friendship],
        context: &ScoringContext,
    ) -> Vec<ScoredSlot> {
        let mut scored: Vec<ScoredSlot> = slots
            .iter()
            .map(|s| self.score_slot(s, prefs, friendships, context))
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

impl Default for SlotScorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for SlotScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotScorer")
            .field(
                "factors",
                &self
                    .factors
                    .iter()
                    .map(|w| format!("{}(w={})", w.factor.name(), w.weight))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
