//! Negotiation quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Proposal count | Number of accepted proposals |
//! | Per-user load | Proposals each participant appears in |
//! | Per-type count | Proposals per engagement type |
//! | Mean / min / max score | Over accepted proposal scores |
//! | Unmatched | Participants left without any proposal |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::NegotiationOutcome;

/// Summary of a negotiation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationSummary {
    /// Accepted proposals.
    pub proposal_count: usize,
    /// Proposals per participant.
    pub proposals_by_user: BTreeMap<String, usize>,
    /// Proposals per engagement type.
    pub proposals_by_type: BTreeMap<String, usize>,
    /// Mean score (0.0 when empty).
    pub mean_score: f64,
    /// Lowest score (0.0 when empty).
    pub min_score: f64,
    /// Highest score (0.0 when empty).
    pub max_score: f64,
    /// Participants with no proposal, in the order given.
    pub unmatched: Vec<String>,
}

impl NegotiationSummary {
    /// Computes the summary for `outcome`.
    ///
    /// # Arguments
    /// * `outcome` - Result of a negotiation run.
    /// * `participant_ids` - Everyone who took part, to report the unmatched.
    pub fn calculate(outcome: &NegotiationOutcome, participant_ids: &[String]) -> Self {
        let mut proposals_by_user: BTreeMap<String, usize> = BTreeMap::new();
        let mut proposals_by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut total = 0.0;
        let mut min_score = f64::INFINITY;
        let mut max_score = f64::NEG_INFINITY;

        for p in &outcome.proposals {
            *proposals_by_type.entry(p.engagement_type.clone()).or_insert(0) += 1;
            for id in &p.participants {
                *proposals_by_user.entry(id.clone()).or_insert(0) += 1;
            }
            let score = p.slot.score;
            total += score;
            min_score = min_score.min(score);
            max_score = max_score.max(score);
        }

        let proposal_count = outcome.proposals.len();
        let (mean_score, min_score, max_score) = if proposal_count == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (total / proposal_count as f64, min_score, max_score)
        };

        let unmatched = participant_ids
            .iter()
            .filter(|id| !proposals_by_user.contains_key(id.as_str()))
            .cloned()
            .collect();

        Self {
            proposal_count,
            proposals_by_user,
            proposals_by_type,
            mean_score,
            min_score,
            max_score,
            unmatched,
        }
    }

    /// Whether every participant got at least one proposal.
    pub fn everyone_matched(&self) -> bool {
        self.unmatched.is_empty()
    }

    /// Whether the outcome reaches the given proposal count and mean score.
    pub fn meets_thresholds(&self, min_proposals: usize, min_mean_score: f64) -> bool {
        self.proposal_count >= min_proposals && self.mean_score >= min_mean_score
    }
}
