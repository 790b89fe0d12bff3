//! Negotiation engine.
//!
//! # Algorithm
//!
//! 1. Compute each participant's weekly free slots.
//! 2. Find overlaps once across everyone. None → log and stop.
//! 3. Rank every overlap per engagement type.
//! 4. Merge all (type, slot) candidates into one list, highest score first.
//! 5. Walk it once, accepting a candidate iff every participant is under
//!    their weekly cap, nobody is already booked at an intersecting time,
//!    and the (type, sorted participants) key is unused.
//!
//! There is no backtracking; a rejected candidate is never revisited.
//!
//! # Complexity
//! O(o · t · log(o · t)) for the merge, where o = overlaps, t = types.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace, warn};

use super::{NegotiationOutcome, NegotiationParams};
use crate::availability::AvailabilityCalculator;
use crate::config::EngineConfig;
use crate::models::{
    FreeSlot, GroupKey, LocationEntry, NegotiationLog, ProposalCandidate, ScoredSlot, TimeWindow,
};
use crate::overlap::OverlapFinder;
use crate::scoring::{ScoringContext, SlotScorer};

fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

/// Runs a negotiation with the default configuration.
pub fn negotiate(params: &NegotiationParams) -> NegotiationOutcome {
    Negotiator::default().negotiate(params)
}

/// Deterministic proposal negotiator.
///
/// Holds configuration only; all per-run state (weekly counts, booked
/// intervals, used group keys) lives inside [`Negotiator::negotiate`], so
/// one negotiator can serve concurrent runs.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_rendezvous::negotiator::{NegotiationParams, Negotiator, ParticipantInput};
///
/// let params = NegotiationParams::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .with_participant(ParticipantInput::new("amy"))
///     .with_participant(ParticipantInput::new("bob"))
///     .with_engagement_type("coffee");
///
/// let outcome = Negotiator::default().negotiate(&params);
/// assert_eq!(outcome.proposals.len(), 1);
/// assert_eq!(outcome.proposals[0].title, "Coffee with bob");
/// ```
#[derive(Debug, Clone)]
pub struct Negotiator {
    config: EngineConfig,
    scorer: SlotScorer,
    clock: fn() -> DateTime<Utc>,
}

impl Negotiator {
    /// Creates a negotiator with the stock scorer for `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scorer: SlotScorer::from_config(&config),
            config,
            clock: system_clock,
        }
    }

    /// Replaces the scorer.
    pub fn with_scorer(mut self, scorer: SlotScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Sets the clock used to stamp log entries.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one negotiation pass.
    pub fn negotiate(&self, params: &NegotiationParams) -> NegotiationOutcome {
        let mut log = NegotiationLog::new();

        let ids: Vec<&str> = params
            .participants
            .iter()
            .map(|p| p.user_id.as_str())
            .collect();
        self.note(
            &mut log,
            format!("Starting negotiation for week of {}", params.week_start),
        );
        self.note(&mut log, format!("Participants: {}", ids.join(", ")));
        self.note(
            &mut log,
            format!("Engagement types: {}", params.engagement_types.join(", ")),
        );

        let availability = self.availability(params);
        let overlaps = OverlapFinder::new(self.config.min_overlap_minutes).find(&availability);
        if overlaps.is_empty() {
            self.note(&mut log, "No overlapping availability found");
            return NegotiationOutcome {
                proposals: Vec::new(),
                log,
            };
        }
        self.note(
            &mut log,
            format!("Found {} overlapping windows", overlaps.len()),
        );

        let travel = travel_minutes_by_user(&params.locations);
        let mut candidates: Vec<(&str, ScoredSlot)> = Vec::new();
        for kind in &params.engagement_types {
            let context = ScoringContext::new(kind.as_str())
                .with_timezone(self.config.timezone)
                .with_recency_map(params.recency_days.clone())
                .with_travel_map(travel.clone());
            let ranked =
                self.scorer
                    .rank_slots(&overlaps, &params.prefs, &params.friendships, &context);
            if let Some(top) = ranked.first() {
                self.note(&mut log, format!("Top {kind} score: {:.2}", top.score));
            }
            candidates.extend(ranked.into_iter().map(|s| (kind.as_str(), s)));
        }

        // Stable: equal scores keep type order, then rank order.
        candidates.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));

        let proposals = self.select(candidates, params, &mut log);
        self.note(
            &mut log,
            format!("Negotiation complete with {} proposal(s)", proposals.len()),
        );
        NegotiationOutcome { proposals, log }
    }

    fn availability(&self, params: &NegotiationParams) -> BTreeMap<String, Vec<FreeSlot>> {
        let calculator = AvailabilityCalculator::new(self.config.clone());
        let mut availability = BTreeMap::new();

        for p in &params.participants {
            if availability.contains_key(&p.user_id) {
                warn!(user = %p.user_id, "duplicate participant ignored");
                continue;
            }
            let buffer = params
                .prefs
                .get(&p.user_id)
                .map(|prefs| prefs.buffer_minutes)
                .unwrap_or(self.config.default_buffer_minutes);
            let slots = calculator.week_availability(
                &p.user_id,
                &p.events,
                &p.constraints,
                params.week_start,
                buffer,
            );
            availability.insert(p.user_id.clone(), slots);
        }
        availability
    }

    fn select(
        &self,
        candidates: Vec<(&str, ScoredSlot)>,
        params: &NegotiationParams,
        log: &mut NegotiationLog,
    ) -> Vec<ProposalCandidate> {
        let mut weekly_counts: HashMap<String, u32> = HashMap::new();
        let mut booked: HashMap<String, Vec<TimeWindow>> = HashMap::new();
        let mut used_keys: HashSet<GroupKey> = HashSet::new();
        let mut proposals = Vec::new();

        for (kind, scored) in candidates {
            let window = scored.slot.window();
            let ids = &scored.slot.participant_ids;

            if let Some(capped) = ids.iter().find(|id| {
                weekly_counts.get(id.as_str()).copied().unwrap_or(0) >= self.weekly_cap(id, params)
            }) {
                trace!(kind, user = %capped, "skipped: weekly cap reached");
                continue;
            }
            if let Some(busy) = ids.iter().find(|id| {
                booked
                    .get(id.as_str())
                    .is_some_and(|ws| ws.iter().any(|w| w.overlaps(&window)))
            }) {
                trace!(kind, user = %busy, "skipped: already booked");
                continue;
            }
            let key = scored.slot.group_key(kind);
            if used_keys.contains(&key) {
                trace!(kind, group = ?key.1, "skipped: group already proposed");
                continue;
            }

            for id in ids {
                *weekly_counts.entry(id.clone()).or_insert(0) += 1;
                booked.entry(id.clone()).or_default().push(window);
            }
            used_keys.insert(key);

            let location = first_location(&params.locations, ids);
            let title = build_title(kind, ids);
            let participants = ids.clone();

            self.note(
                log,
                format!(
                    "Selected \"{title}\" {} (score {:.2})",
                    self.describe(&window),
                    scored.score
                ),
            );
            proposals.push(ProposalCandidate {
                engagement_type: kind.to_string(),
                title,
                location_name: location.map(|l| l.location_name.clone()),
                location_id: location.and_then(|l| l.location_id.clone()),
                participants,
                slot: scored,
            });
        }
        proposals
    }

    fn weekly_cap(&self, user_id: &str, params: &NegotiationParams) -> u32 {
        params
            .prefs
            .get(user_id)
            .map(|p| p.max_events_per_week)
            .unwrap_or(self.config.default_weekly_cap)
    }

    fn describe(&self, window: &TimeWindow) -> String {
        let tz = self.config.timezone;
        let start = window.start.with_timezone(&tz);
        let end = window.end.with_timezone(&tz);
        format!("{}–{}", start.format("%a %Y-%m-%d %H:%M"), end.format("%H:%M"))
    }

    fn note(&self, log: &mut NegotiationLog, message: impl Into<String>) {
        let message = message.into();
        info!(target: "u_rendezvous::negotiation", "{message}");
        log.push((self.clock)(), message);
    }
}

impl Default for Negotiator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Shortest travel time per person across their locations.
fn travel_minutes_by_user(locations: &[LocationEntry]) -> HashMap<String, f64> {
    let mut travel: HashMap<String, f64> = HashMap::new();
    for loc in locations {
        if let Some(minutes) = loc.travel_minutes {
            travel
                .entry(loc.user_id.clone())
                .and_modify(|m| *m = m.min(minutes))
                .or_insert(minutes);
        }
    }
    debug!(users = travel.len(), "travel times collected");
    travel
}

/// First location entry (input order) owned by any participant.
fn first_location<'a>(
    locations: &'a [LocationEntry],
    participant_ids: &[String],
) -> Option<&'a LocationEntry> {
    locations
        .iter()
        .find(|l| participant_ids.iter().any(|id| *id == l.user_id))
}

/// Builds a proposal title such as `"Coffee with bob & cat"`.
///
/// The first participant is the implicit initiator and is left out.
///
/// ```
/// use u_rendezvous::negotiator::build_title;
///
/// let ids: Vec<String> = ["amy", "bob", "cat", "dan"].iter().map(|s| s.to_string()).collect();
/// assert_eq!(build_title("dinner", &ids[..2]), "Dinner with bob");
/// assert_eq!(build_title("dinner", &ids), "Dinner with bob, cat & dan");
/// ```
pub fn build_title(engagement_type: &str, participant_ids: &[String]) -> String {
    let mut chars = engagement_type.chars();
    let label: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    match participant_ids.get(1..).unwrap_or(&[]) {
        [] => label,
        [only] => format!("{label} with {only}"),
        [init @ .., last] => format!("{label} with {} & {last}", init.join(", ")),
    }
}
