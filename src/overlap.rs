//! Overlap finder.
//!
//! Finds windows where two or more people are simultaneously free.
//!
//! # Algorithm
//!
//! 1. For every unordered pair of people, sweep both sorted free-slot
//!    lists with two pointers and keep intersections of at least the
//!    minimum duration. These pairwise overlaps are always returned.
//! 2. Seed a group from each pairwise overlap: visit every other person
//!    once (id order) and add them if one of their slots intersects the
//!    running window by at least the minimum, narrowing the window to
//!    that intersection.
//! 3. Groups of three or more are deduplicated on
//!    (start, end, sorted ids) and appended; the result is sorted by start.
//!
//! The group step is greedy and seeded from pairs. It can miss a group
//! overlap that no pair seed leads to; callers depend on exactly this
//! candidate set, so it is not an exhaustive search.
//!
//! # Complexity
//! O(p² · s) for pairs plus O(o · p · s) for extension, where
//! p = people, s = slots per person, o = pairwise overlaps.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{FreeSlot, OverlapSlot, TimeWindow};

/// Default minimum overlap length (minutes).
pub const DEFAULT_MIN_DURATION_MINUTES: i64 = 60;

/// Finds pairwise and group overlaps.
///
/// `availabilities` maps each person to their free slots; slot order does
/// not matter.
///
/// ```
/// use std::collections::BTreeMap;
/// use chrono::{TimeZone, Utc};
/// use u_rendezvous::models::FreeSlot;
/// use u_rendezvous::overlap::find_overlaps;
///
/// let t = |h| Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap();
/// let mut avail = BTreeMap::new();
/// avail.insert("amy".to_string(), vec![FreeSlot::new(t(9), t(12), "amy")]);
/// avail.insert("bob".to_string(), vec![FreeSlot::new(t(10), t(14), "bob")]);
///
/// let overlaps = find_overlaps(&avail, 60);
/// assert_eq!(overlaps.len(), 1);
/// assert_eq!(overlaps[0].start, t(10));
/// assert_eq!(overlaps[0].end, t(12));
/// ```
pub fn find_overlaps(
    availabilities: &BTreeMap<String, Vec<FreeSlot>>,
    min_duration_minutes: i64,
) -> Vec<OverlapSlot> {
    OverlapFinder::new(min_duration_minutes).find(availabilities)
}

/// Overlap finder with a fixed minimum duration.
#[derive(Debug, Clone, Copy)]
pub struct OverlapFinder {
    min_duration_minutes: i64,
}

impl OverlapFinder {
    /// Creates a finder.
    pub fn new(min_duration_minutes: i64) -> Self {
        Self {
            min_duration_minutes,
        }
    }

    /// Runs the pair sweep and group extension.
    pub fn find(&self, availabilities: &BTreeMap<String, Vec<FreeSlot>>) -> Vec<OverlapSlot> {
        let sorted: Vec<(&str, Vec<TimeWindow>)> = availabilities
            .iter()
            .map(|(id, slots)| {
                let mut windows: Vec<TimeWindow> = slots
                    .iter()
                    .map(FreeSlot::window)
                    .filter(|w| !w.is_empty())
                    .collect();
                windows.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
                (id.as_str(), windows)
            })
            .collect();

        let mut pairs = Vec::new();
        for i in 0..sorted.len() {
            for j in (i + 1)..sorted.len() {
                let (a_id, a_slots) = &sorted[i];
                let (b_id, b_slots) = &sorted[j];
                for w in self.sweep(a_slots, b_slots) {
                    pairs.push(OverlapSlot::new(
                        w.start,
                        w.end,
                        vec![a_id.to_string(), b_id.to_string()],
                    ));
                }
            }
        }

        let mut seen: HashSet<(DateTime<Utc>, DateTime<Utc>, Vec<String>)> = HashSet::new();
        let mut groups = Vec::new();
        for pair in &pairs {
            if let Some(group) = self.extend(pair, &sorted) {
                let key = (group.start, group.end, group.sorted_participants());
                if seen.insert(key) {
                    groups.push(group);
                }
            }
        }

        debug!(
            people = sorted.len(),
            pairs = pairs.len(),
            groups = groups.len(),
            "found overlaps"
        );

        let mut overlaps = pairs;
        overlaps.extend(groups);
        overlaps.sort_by_key(|o| o.start);
        overlaps
    }

    /// Two-pointer intersection of two sorted slot lists.
    fn sweep(&self, a: &[TimeWindow], b: &[TimeWindow]) -> Vec<TimeWindow> {
        let mut found = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            if let Some(w) = a[i].intersection(&b[j]) {
                if self.long_enough(&w) {
                    found.push(w);
                }
            }
            if a[i].end < b[j].end {
                i += 1;
            } else {
                j += 1;
            }
        }
        found
    }

    /// Greedily grows a pair overlap into a larger group.
    ///
    /// Returns `None` unless at least one more person fits.
    fn extend(
        &self,
        seed: &OverlapSlot,
        people: &[(&str, Vec<TimeWindow>)],
    ) -> Option<OverlapSlot> {
        let mut window = seed.window();
        let mut members = seed.participant_ids.clone();

        for (id, slots) in people {
            if members.iter().any(|m| m == id) {
                continue;
            }
            let narrowed = slots
                .iter()
                .filter_map(|s| s.intersection(&window))
                .find(|w| self.long_enough(w));
            if let Some(narrowed) = narrowed {
                members.push(id.to_string());
                window = narrowed;
            }
        }

        (members.len() > seed.participant_ids.len() && self.long_enough(&window))
            .then(|| OverlapSlot::new(window.start, window.end, members))
    }

    #[inline]
    fn long_enough(&self, w: &TimeWindow) -> bool {
        w.duration_minutes() >= self.min_duration_minutes
    }
}

impl Default for OverlapFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DURATION_MINUTES)
    }
}
