//! Availability calculator.
//!
//! Converts one person's busy events and recurring constraints into
//! free-time windows inside the daily schedulable window.
//!
//! # Algorithm
//!
//! 1. Start from the local window `[day_start, day_end)` (07:00–22:00 by default).
//! 2. Collect busy intervals:
//!    - busy events overlapping the window, padded by ±buffer and clamped
//!      (all-day events take the whole window; non-busy events are ignored);
//!    - constraints listing this weekday, converted to absolute intervals
//!      and clamped.
//! 3. Sort by start (ties by end) and merge overlapping/adjacent intervals.
//! 4. Subtract the merged list from the window, keeping positive remainders.
//!
//! # Complexity
//! O(e log e) per day where e = events + constraints.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{
    merge_windows, subtract_windows, CalendarEvent, Constraint, FreeSlot, TimeWindow,
};

/// Longest buffer applied around an event (one day).
pub const MAX_BUFFER_MINUTES: i64 = 24 * 60;

/// Computes free slots for a single day using the default configuration.
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use u_rendezvous::availability::compute_free_slots;
/// use u_rendezvous::models::CalendarEvent;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let meeting = CalendarEvent::busy(
///     "m1",
///     Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap(),
/// );
/// let free = compute_free_slots("amy", &[meeting], &[], day, 30);
/// assert_eq!(free.len(), 2);
/// assert_eq!(free[1].start, Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 0).unwrap());
/// ```
pub fn compute_free_slots(
    owner_id: &str,
    events: &[CalendarEvent],
    constraints: &[Constraint],
    day: NaiveDate,
    buffer_minutes: i64,
) -> Vec<FreeSlot> {
    AvailabilityCalculator::default().free_slots(owner_id, events, constraints, day, buffer_minutes)
}

/// Computes free slots for the seven days starting at `week_start`
/// using the default configuration.
pub fn compute_week_availability(
    owner_id: &str,
    events: &[CalendarEvent],
    constraints: &[Constraint],
    week_start: NaiveDate,
    buffer_minutes: i64,
) -> Vec<FreeSlot> {
    AvailabilityCalculator::default().week_availability(
        owner_id,
        events,
        constraints,
        week_start,
        buffer_minutes,
    )
}

/// Availability calculator bound to a configuration (zone and day bounds).
#[derive(Debug, Clone, Default)]
pub struct AvailabilityCalculator {
    config: EngineConfig,
}

impl AvailabilityCalculator {
    /// Creates a calculator with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The schedulable window of `day`, as absolute instants.
    ///
    /// Returns `None` if the configured bounds are inverted.
    pub fn day_window(&self, day: NaiveDate) -> Option<TimeWindow> {
        let tz = self.config.timezone;
        let window = TimeWindow::new(
            local_instant(tz, day, self.config.day_start),
            local_instant(tz, day, self.config.day_end),
        );
        (!window.is_empty()).then_some(window)
    }

    /// Free slots of one person for one day.
    pub fn free_slots(
        &self,
        owner_id: &str,
        events: &[CalendarEvent],
        constraints: &[Constraint],
        day: NaiveDate,
        buffer_minutes: i64,
    ) -> Vec<FreeSlot> {
        let Some(window) = self.day_window(day) else {
            return Vec::new();
        };

        let mut busy = self.event_blocks(events, &window, buffer_minutes);
        busy.extend(self.constraint_blocks(constraints, day, &window));

        let merged = merge_windows(busy);
        subtract_windows(&window, &merged)
            .into_iter()
            .map(|w| FreeSlot::new(w.start, w.end, owner_id))
            .collect()
    }

    /// Free slots of one person for the week starting at `week_start`.
    pub fn week_availability(
        &self,
        owner_id: &str,
        events: &[CalendarEvent],
        constraints: &[Constraint],
        week_start: NaiveDate,
        buffer_minutes: i64,
    ) -> Vec<FreeSlot> {
        let slots: Vec<FreeSlot> = week_start
            .iter_days()
            .take(7)
            .flat_map(|day| self.free_slots(owner_id, events, constraints, day, buffer_minutes))
            .collect();

        debug!(
            owner = owner_id,
            week_start = %week_start,
            slots = slots.len(),
            "computed weekly availability"
        );
        slots
    }

    fn event_blocks(
        &self,
        events: &[CalendarEvent],
        window: &TimeWindow,
        buffer_minutes: i64,
    ) -> Vec<TimeWindow> {
        let buffer = Duration::minutes(buffer_minutes.clamp(0, MAX_BUFFER_MINUTES));

        events
            .iter()
            .filter(|e| e.is_busy && e.start_time < e.end_time)
            .filter_map(|e| {
                let raw = TimeWindow::new(e.start_time, e.end_time);
                if !raw.overlaps(window) {
                    return None;
                }
                if e.is_all_day {
                    return Some(*window);
                }
                TimeWindow::new(e.start_time - buffer, e.end_time + buffer).clamp_to(window)
            })
            .collect()
    }

    fn constraint_blocks(
        &self,
        constraints: &[Constraint],
        day: NaiveDate,
        window: &TimeWindow,
    ) -> Vec<TimeWindow> {
        let tz = self.config.timezone;
        let weekday = day.weekday();
        let midnight = local_instant(tz, day, NaiveTime::MIN);
        let next_midnight = day
            .succ_opt()
            .map(|next| local_instant(tz, next, NaiveTime::MIN))
            .unwrap_or(window.end);

        let mut blocks = Vec::new();
        for c in constraints.iter().filter(|c| c.applies_on(weekday)) {
            let start = local_instant(tz, day, c.start_time);
            let end = local_instant(tz, day, c.end_time);
            if c.wraps_midnight() {
                blocks.push(TimeWindow::new(start, next_midnight));
                blocks.push(TimeWindow::new(midnight, end));
            } else {
                blocks.push(TimeWindow::new(start, end));
            }
        }

        blocks.iter().filter_map(|b| b.clamp_to(window)).collect()
    }
}

/// Resolves a local wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times (DST fall-back) take the earliest instant; times in a
/// DST gap move forward to the first valid minute after it.
pub(crate) fn local_instant(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);
    let mut probe = naive;
    for _ in 0..=240 {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => probe += Duration::minutes(1),
        }
    }
    Utc.from_utc_datetime(&naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConstraintKind;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() // Monday
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn event(h1: u32, m1: u32, h2: u32, m2: u32) -> CalendarEvent {
        CalendarEvent::busy(format!("e{h1}{m1}"), at(h1, m1), at(h2, m2))
    }

    #[test]
    fn test_empty_day_is_whole_window() {
        let free = compute_free_slots("amy", &[], &[], day(), 0);
        assert_eq!(free, vec![FreeSlot::new(at(7, 0), at(22, 0), "amy")]);
    }

    #[test]
    fn test_buffer_pushes_next_slot() {
        // Event ends 13:00 with 30-minute buffer → next free slot starts 13:30.
        let free = compute_free_slots("amy", &[event(12, 0, 13, 0)], &[], day(), 30);
        assert_eq!(free.len(), 2);
        assert_eq!(free[0].end, at(11, 30));
        assert_eq!(free[1].start, at(13, 30));
        assert_eq!(free[1].end, at(22, 0));
    }

    #[test]
    fn test_event_outside_window_ignored() {
        let free = compute_free_slots("amy", &[event(5, 0, 6, 30)], &[], day(), 60);
        assert_eq!(free, vec![FreeSlot::new(at(7, 0), at(22, 0), "amy")]);
    }

    #[test]
    fn test_non_busy_event_ignored() {
        let free = compute_free_slots("amy", &[event(10, 0, 11, 0).free()], &[], day(), 0);
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn test_all_day_event_blocks_everything() {
        let e = CalendarEvent::busy(
            "holiday",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        )
        .all_day();
        assert!(compute_free_slots("amy", &[e], &[], day(), 0).is_empty());
    }

    #[test]
    fn test_overlapping_events_merge() {
        let events = [event(9, 0, 10, 0), event(9, 30, 11, 0), event(11, 0, 12, 0)];
        let free = compute_free_slots("amy", &events, &[], day(), 0);
        assert_eq!(
            free,
            vec![
                FreeSlot::new(at(7, 0), at(9, 0), "amy"),
                FreeSlot::new(at(12, 0), at(22, 0), "amy"),
            ]
        );
    }

    #[test]
    fn test_work_constraint_only_on_listed_days() {
        let work = Constraint::parse(ConstraintKind::Work, &["mon"], "09:00", "17:00").unwrap();
        let mon = compute_free_slots("amy", &[], std::slice::from_ref(&work), day(), 0);
        assert_eq!(mon.len(), 2);
        assert_eq!(mon[0].end, at(9, 0));
        assert_eq!(mon[1].start, at(17, 0));

        let tue = compute_free_slots("amy", &[], &[work], day().succ_opt().unwrap(), 0);
        assert_eq!(tue.len(), 1);
    }

    #[test]
    fn test_wrapping_sleep_constraint() {
        let sleep = Constraint::parse(ConstraintKind::Sleep, &["mon"], "21:00", "08:00").unwrap();
        let free = compute_free_slots("amy", &[], &[sleep], day(), 0);
        assert_eq!(free, vec![FreeSlot::new(at(8, 0), at(21, 0), "amy")]);
    }

    #[test]
    fn test_timezone_pins_window() {
        let config = EngineConfig::default()
            .with_timezone_name("America/New_York")
            .unwrap();
        let calc = AvailabilityCalculator::new(config);
        let free = calc.free_slots("amy", &[], &[], day(), 0);
        // EST is UTC-5 in January.
        assert_eq!(free[0].start, at(12, 0));
        assert_eq!(free[0].end, Utc.with_ymd_and_hms(2024, 1, 2, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_dst_gap_resolves_forward() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let t = local_instant(tz, d, NaiveTime::from_hms_opt(2, 30, 0).unwrap());
        // 02:30 does not exist; 03:00 EDT = 07:00 UTC.
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 10, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_dst_overlap_takes_earliest() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let d = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let t = local_instant(tz, d, NaiveTime::from_hms_opt(1, 30, 0).unwrap());
        // 01:30 occurs twice; the EDT reading (UTC-4) comes first.
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_equal_times_constraint_blocks_nothing() {
        let nap = Constraint::parse(ConstraintKind::Nap, &["mon"], "13:00", "13:00").unwrap();
        let with_nap = compute_free_slots("amy", &[], &[nap], day(), 0);
        assert_eq!(with_nap, compute_free_slots("amy", &[], &[], day(), 0));
        assert_eq!(with_nap.len(), 1);
        assert_eq!(with_nap[0].start, at(7, 0));
        assert_eq!(with_nap[0].end, at(22, 0));
    }

    #[test]
    fn test_huge_buffer_is_capped() {
        let meeting = CalendarEvent::busy("m", at(10, 0), at(11, 0));
        let free = compute_free_slots("amy", &[meeting], &[], day(), i64::MAX);
        assert!(free.is_empty());
    }

    #[test]
    fn test_week_concatenates_seven_days() {
        let week = compute_week_availability("amy", &[], &[], day(), 0);
        assert_eq!(week.len(), 7);
        assert!(week.windows(2).all(|w| w[0].end < w[1].start));
    }

    #[test]
    fn test_random_inputs_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let window = TimeWindow::new(at(7, 0), at(22, 0));
        for _ in 0..200 {
            let events: Vec<CalendarEvent> = (0..rng.random_range(0..8))
                .map(|i| {
                    let start = at(rng.random_range(0..23), rng.random_range(0..60));
                    let len = Duration::minutes(rng.random_range(1..240));
                    CalendarEvent::busy(format!("e{i}"), start, start + len)
                })
                .collect();
            let buffer = rng.random_range(0..45);

            let free = compute_free_slots("amy", &events, &[], day(), buffer);
            let again = compute_free_slots("amy", &events, &[], day(), buffer);
            assert_eq!(free, again);

            for s in &free {
                assert!(s.start < s.end);
                assert!(window.contains_window(&s.window()));
            }
            for pair in free.windows(2) {
                assert!(pair[0].end < pair[1].start);
            }
        }
    }
}
