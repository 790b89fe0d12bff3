//! Slot scoring: weighted multi-factor desirability.
//!
//! Each candidate overlap is scored per engagement type by seven
//! independent factors, each in `[0, 1]`, combined with fixed weights
//! that sum to 1.0:
//!
//! | Factor | Weight |
//! |--------|--------|
//! | `time_preference` | 0.25 |
//! | `event_type_fit` | 0.20 |
//! | `location_convenience` | 0.15 |
//! | `priority_contact` | 0.15 |
//! | `weather_suitability` | 0.10 |
//! | `recency` | 0.10 |
//! | `cap_distance` | 0.05 |
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use chrono::{TimeZone, Utc};
//! use u_rendezvous::models::OverlapSlot;
//! use u_rendezvous::scoring::{ScoringContext, SlotScorer};
//!
//! let slot = OverlapSlot::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
//!     vec!["amy".into(), "bob".into()],
//! );
//! let scorer = SlotScorer::standard();
//! let scored = scorer.score_slot(&slot, &HashMap::new(), &[], &ScoringContext::new("coffee"));
//! assert!(scored.score > 0.0 && scored.score <= 1.0);
//! assert_eq!(scored.breakdown.len(), 7);
//! ```

mod context;
pub mod factors;
mod scorer;

pub use context::{pair_key, participant_pairs, ScoringContext, ScoringInputs};
pub use scorer::SlotScorer;

use crate::models::OverlapSlot;
use std::fmt::Debug;

/// Value returned by a scoring factor, in `[0, 1]` (higher = better).
pub type FactorValue = f64;

/// One desirability factor.
///
/// Values outside `[0, 1]` are clamped by [`SlotScorer`].
pub trait ScoringFactor: Send + Sync + Debug {
    /// Factor name, used as the breakdown key (e.g. `"recency"`).
    fn name(&self) -> &'static str;

    /// Evaluates the factor for a slot.
    fn evaluate(&self, slot: &OverlapSlot, inputs: &ScoringInputs<'_>) -> FactorValue;

    /// Factor description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
