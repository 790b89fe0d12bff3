//! Matching domain models.
//!
//! Inputs (calendar events, recurring constraints, preferences,
//! friendships, locations) and the values the pipeline derives from them
//! (free slots, overlaps, scored slots, proposals, the run log).
//!
//! # Time Model
//! Instants are UTC. Local-time reasoning happens only where a
//! configured time zone is supplied (see [`crate::config::EngineConfig`]).

pub mod calendar;
mod interval;
mod prefs;
mod proposal;
mod slot;

pub use calendar::{CalendarEvent, Constraint, ConstraintKind};
pub use interval::{merge_windows, subtract_windows, TimeWindow};
pub use prefs::{Friendship, LocationEntry, UserPrefs};
pub use proposal::{LogEntry, NegotiationLog, ProposalCandidate};
pub use slot::{FreeSlot, GroupKey, OverlapSlot, ScoredSlot};
