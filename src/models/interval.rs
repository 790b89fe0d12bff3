//! Half-open time intervals and interval arithmetic.
//!
//! Everything downstream (busy blocks, free slots, overlaps, booked
//! proposals) is an interval `[start, end)` of UTC instants. Two
//! intervals that merely touch do not overlap.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length of this window in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Whether the window has strictly positive length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Common part of two windows, if it has positive length.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end > start).then_some(Self { start, end })
    }

    /// Whether `other` lies entirely inside this window.
    pub fn contains_window(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Restricts this window to `bounds`. Returns `None` when nothing is left.
    pub fn clamp_to(&self, bounds: &Self) -> Option<Self> {
        self.intersection(bounds)
    }
}

/// Sorts windows by start (ties by end) and merges overlapping or
/// adjacent ones.
pub fn merge_windows(mut windows: Vec<TimeWindow>) -> Vec<TimeWindow> {
    windows.retain(|w| !w.is_empty());
    windows.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut merged: Vec<TimeWindow> = Vec::with_capacity(windows.len());
    for w in windows {
        match merged.last_mut() {
            Some(last) if w.start <= last.end => {
                last.end = last.end.max(w.end);
            }
            _ => merged.push(w),
        }
    }
    merged
}

/// Removes every `busy` window from `bounds`.
///
/// `busy` must already be merged (sorted, non-overlapping). Only
/// remainders with positive length are returned, in chronological order.
pub fn subtract_windows(bounds: &TimeWindow, busy: &[TimeWindow]) -> Vec<TimeWindow> {
    let mut free = Vec::new();
    let mut cursor = bounds.start;

    for b in busy {
        if b.end <= cursor {
            continue;
        }
        if b.start >= bounds.end {
            break;
        }
        if b.start > cursor {
            free.push(TimeWindow::new(cursor, b.start.min(bounds.end)));
        }
        cursor = cursor.max(b.end);
        if cursor >= bounds.end {
            break;
        }
    }

    if cursor < bounds.end {
        free.push(TimeWindow::new(cursor, bounds.end));
    }
    free
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn w(h1: u32, h2: u32) -> TimeWindow {
        TimeWindow::new(at(h1, 0), at(h2, 0))
    }

    #[test]
    fn test_time_window() {
        let x = w(9, 11);
        assert_eq!(x.duration_minutes(), 120);
        assert!(!x.is_empty());
        assert!(TimeWindow::new(at(9, 0), at(9, 0)).is_empty());
    }

    #[test]
    fn test_overlap_is_exclusive_at_end() {
        let a = w(9, 10);
        let b = w(10, 11);
        assert!(!a.overlaps(&b)); // touching but not overlapping
        assert!(a.intersection(&b).is_none());
        assert!(w(9, 11).overlaps(&w(10, 12)));
        assert_eq!(w(9, 11).intersection(&w(10, 12)), Some(w(10, 11)));
    }

    #[test]
    fn test_contains_window() {
        assert!(w(8, 12).contains_window(&w(9, 10)));
        assert!(w(8, 12).contains_window(&w(8, 12)));
        assert!(!w(8, 12).contains_window(&w(11, 13)));
    }

    #[test]
    fn test_merge_overlapping_and_adjacent() {
        let merged = merge_windows(vec![w(13, 14), w(9, 10), w(10, 11), w(9, 10), w(15, 17), w(16, 18)]);
        assert_eq!(merged, vec![w(9, 11), w(13, 14), w(15, 18)]);
    }

    #[test]
    fn test_merge_drops_empty() {
        let merged = merge_windows(vec![TimeWindow::new(at(12, 0), at(11, 0)), w(9, 10)]);
        assert_eq!(merged, vec![w(9, 10)]);
    }

    #[test]
    fn test_subtract() {
        let free = subtract_windows(&w(7, 22), &[w(9, 10), w(12, 14)]);
        assert_eq!(free, vec![w(7, 9), w(10, 12), w(14, 22)]);
    }

    #[test]
    fn test_subtract_edges() {
        assert!(subtract_windows(&w(7, 22), &[w(7, 22)]).is_empty());
        assert_eq!(subtract_windows(&w(7, 22), &[w(7, 8), w(21, 22)]), vec![w(8, 21)]);
        assert_eq!(subtract_windows(&w(7, 22), &[]), vec![w(7, 22)]);
    }
}
