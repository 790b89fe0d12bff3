//! Multi-party availability matching and proposal ranking.
//!
//! Given each person's calendar, recurring constraints, preferences and
//! relationships, finds times when groups are free together, scores those
//! windows per engagement type, and greedily picks a conflict-free set of
//! proposals for one week.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `CalendarEvent`, `Constraint`, `UserPrefs`,
//!   `Friendship`, `LocationEntry`, `FreeSlot`, `OverlapSlot`, `ScoredSlot`,
//!   `ProposalCandidate`, `NegotiationLog`
//! - **`availability`**: Per-person free windows inside the schedulable day
//! - **`overlap`**: Pairwise and group overlaps across people
//! - **`scoring`**: Weighted multi-factor slot scoring
//! - **`negotiator`**: Greedy proposal selection and outcome summary
//! - **`config`**: Engine configuration (time zone, day window, defaults)
//! - **`validation`**: Input integrity checks
//!
//! # Pipeline
//!
//! ```text
//! calendars ──► availability ──► overlap ──► scoring ──► negotiator ──► proposals
//! ```
//!
//! No stage fails on empty input; "nothing to propose" is an empty
//! outcome with a log explaining why.

pub mod availability;
pub mod config;
pub mod error;
pub mod models;
pub mod negotiator;
pub mod overlap;
pub mod scoring;
pub mod validation;

pub use availability::{compute_free_slots, compute_week_availability, AvailabilityCalculator};
pub use config::EngineConfig;
pub use error::ParseError;
pub use negotiator::{negotiate, NegotiationOutcome, NegotiationParams, Negotiator};
pub use overlap::{find_overlaps, OverlapFinder};
pub use scoring::SlotScorer;
