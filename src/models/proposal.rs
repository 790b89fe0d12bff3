//! Negotiation outputs: proposals and the run log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScoredSlot;

/// A selected hangout proposal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProposalCandidate {
    pub slot: ScoredSlot,
    pub engagement_type: String,
    pub title: String,
    pub location_name: Option<String>,
    pub location_id: Option<String>,
    pub participants: Vec<String>,
}

/// One line of narration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Append-only narration of a negotiation run.
///
/// Entries are chronologically non-decreasing: an entry stamped earlier
/// than its predecessor (clock skew) is raised to the predecessor's time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NegotiationLog {
    entries: Vec<LogEntry>,
}

impl NegotiationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message stamped at `timestamp`.
    pub fn push(&mut self, timestamp: DateTime<Utc>, message: impl Into<String>) {
        let timestamp = match self.entries.last() {
            Some(last) if last.timestamp > timestamp => last.timestamp,
            _ => timestamp,
        };
        self.entries.push(LogEntry {
            timestamp,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any message contains `needle` (case-insensitive).
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .any(|e| e.message.to_lowercase().contains(&needle))
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_is_monotonic() {
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut log = NegotiationLog::new();
        log.push(t1, "first");
        log.push(t0, "second");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].timestamp, t1);
        assert!(log.mentions("SECOND"));
    }
}
