//! Input validation for negotiation requests.
//!
//! Checks structural integrity of [`NegotiationParams`] before a run.
//! Detects:
//! - Duplicate participant IDs
//! - Events that end before they start
//! - Friendship priorities outside 1–10
//! - Negative travel times
//! - Missing engagement types
//! - Zero-length constraints
//!
//! Validation is advisory. The negotiator tolerates all of these (bad
//! events are ignored, priorities are clamped) and never calls it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::negotiator::NegotiationParams;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two participants share the same ID.
    DuplicateParticipant,
    /// An event's start is not before its end.
    InvalidEventInterval,
    /// A friendship priority is outside 1–10.
    PriorityOutOfRange,
    /// A location reports negative travel time.
    NegativeTravelTime,
    /// No engagement types were requested.
    NoEngagementTypes,
    /// A constraint starts and ends at the same time.
    EmptyConstraint,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a negotiation request.
///
/// Prefs or locations for people who are not participants are allowed.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_params(params: &NegotiationParams) -> ValidationResult {
    let mut errors = Vec::new();

    if params.engagement_types.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoEngagementTypes,
            "No engagement types requested",
        ));
    }

    let mut seen = HashSet::new();
    for p in &params.participants {
        if !seen.insert(p.user_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateParticipant,
                format!("Duplicate participant ID: {}", p.user_id),
            ));
        }

        for event in &p.events {
            if event.start_time >= event.end_time {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidEventInterval,
                    format!(
                        "Event '{}' of '{}' does not end after it starts",
                        event.id, p.user_id
                    ),
                ));
            }
        }

        for c in &p.constraints {
            if c.start_time == c.end_time {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyConstraint,
                    format!(
                        "{:?} constraint of '{}' starts and ends at {}",
                        c.kind,
                        p.user_id,
                        c.start_time.format("%H:%M")
                    ),
                ));
            }
        }
    }

    for f in &params.friendships {
        if !(1..=10).contains(&f.priority) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PriorityOutOfRange,
                format!(
                    "Friendship {} → {} has priority {}",
                    f.user_id, f.friend_id, f.priority
                ),
            ));
        }
    }

    for loc in &params.locations {
        if loc.travel_minutes.is_some_and(|m| m < 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeTravelTime,
                format!(
                    "Location '{}' of '{}' has negative travel time",
                    loc.location_name, loc.user_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
