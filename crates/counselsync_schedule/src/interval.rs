// --- File: crates/counselsync_schedule/src/interval.rs ---
//! Half-open interval arithmetic over absolute instants.
//!
//! Every cross-system comparison in the engine happens here, in UTC, with
//! half-open `[start, end)` semantics: two ranges overlap iff
//! `a.start < b.end && b.start < a.end`, so ranges that merely touch at an
//! endpoint do not conflict.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// A half-open time interval `[start, end)` in UTC.
///
/// The `start < end` invariant is enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = ScheduleError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap test; touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Intersection of two ranges, `None` when they do not overlap.
    pub fn intersect(&self, other: &TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        TimeRange::new(start, end).ok()
    }
}

/// A time range already occupied on the calendar, tagged with the opaque
/// calendar event id it came from. The id is what lets a reschedule exclude
/// the meeting's own current interval from blocking itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub range: TimeRange,
    pub source_id: Option<String>,
}

impl BusyInterval {
    pub fn new(range: TimeRange, source_id: Option<String>) -> Self {
        Self { range, source_id }
    }
}

/// Merge overlapping or adjacent ranges into a minimal sorted set.
pub fn merge(ranges: &[TimeRange]) -> Vec<TimeRange> {
    if ranges.is_empty() {
        return vec![];
    }
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.start);
    let mut merged: Vec<TimeRange> = vec![sorted[0]];
    for range in &sorted[1..] {
        let last = merged.last_mut().unwrap();
        if range.start <= last.end {
            last.end = last.end.max(range.end);
        } else {
            merged.push(*range);
        }
    }
    merged
}

/// Interval difference: the parts of `block` not covered by `busy`.
///
/// A busy interval strictly inside the block splits it in two; the result is
/// sorted and non-overlapping. `busy` need not be sorted or disjoint.
pub fn subtract_busy(block: TimeRange, busy: &[TimeRange]) -> Vec<TimeRange> {
    let mut free = Vec::new();
    let mut cursor = block.start;
    for b in merge(busy) {
        if !block.overlaps(&b) {
            continue;
        }
        if b.start > cursor {
            // Safe: cursor < b.start here, both inside the block
            free.push(TimeRange::new(cursor, b.start.min(block.end)).unwrap());
        }
        cursor = cursor.max(b.end);
        if cursor >= block.end {
            return free;
        }
    }
    if cursor < block.end {
        free.push(TimeRange::new(cursor, block.end).unwrap());
    }
    free
}

/// Whether `range` collides with any busy interval, ignoring the interval
/// whose source id equals `exclude_source`.
pub fn conflicts_with(
    range: &TimeRange,
    busy: &[BusyInterval],
    exclude_source: Option<&str>,
) -> bool {
    busy.iter()
        .filter(|b| match (exclude_source, b.source_id.as_deref()) {
            (Some(excluded), Some(id)) => id != excluded,
            _ => true,
        })
        .any(|b| range.overlaps(&b.range))
}
