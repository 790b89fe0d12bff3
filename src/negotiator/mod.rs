//! Proposal negotiation and outcome metrics.
//!
//! Turns calendars, preferences and relationships into a conflict-free
//! list of proposed hangouts for one week.
//!
//! # Algorithm
//!
//! `Negotiator` is a greedy, score-ordered selector. Every overlap is
//! scored once per engagement type, the candidates are merged into one
//! descending list, and each is accepted unless it would break a weekly
//! cap, double-book someone, or repeat a (type, group) pair. Not optimal,
//! but deterministic and fast.
//!
//! # Summary
//!
//! `NegotiationSummary` reports proposal counts per user and type, score
//! spread, and who was left out.

mod engine;
mod params;
mod summary;

pub use engine::{build_title, negotiate, Negotiator};
pub use params::{NegotiationOutcome, NegotiationParams, ParticipantInput};
pub use summary::NegotiationSummary;
