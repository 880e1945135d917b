// --- File: crates/counselsync_schedule/src/slots.rs ---
//! Pure slot computation: working-hours blocks minus busy intervals,
//! discretized into fixed-duration bookable slots.

use chrono::Duration;
use tracing::debug;

use crate::interval::{self, BusyInterval, TimeRange};
use crate::working_hours::WorkingHours;

/// Compute the bookable slots inside `window`.
///
/// Walks the working-hours blocks intersecting the window, subtracts the
/// busy intervals (interval difference, so one busy interval can split a
/// block in two), then chops each free block into consecutive slots of
/// exactly `duration`, dropping any trailing remainder shorter than the
/// duration. The busy interval whose source id equals `exclude_source` is
/// ignored, so a meeting under reschedule does not block itself.
///
/// The result is chronological, truncated to `max_results`, and recomputed
/// fresh on every call.
pub fn slots_for_window(
    hours: &WorkingHours,
    window: TimeRange,
    duration: Duration,
    busy: &[BusyInterval],
    exclude_source: Option<&str>,
    max_results: usize,
) -> Vec<TimeRange> {
    if duration <= Duration::zero() || max_results == 0 {
        return vec![];
    }

    let busy_ranges: Vec<TimeRange> = busy
        .iter()
        .filter(|b| match (exclude_source, b.source_id.as_deref()) {
            (Some(excluded), Some(id)) => id != excluded,
            _ => true,
        })
        .map(|b| b.range)
        .collect();

    let blocks = hours.blocks_within(window);
    debug!(
        "resolving slots: {} working blocks, {} busy intervals in window {} - {}",
        blocks.len(),
        busy_ranges.len(),
        window.start(),
        window.end()
    );

    let mut slots = Vec::new();
    'blocks: for block in blocks {
        for free in interval::subtract_busy(block, &busy_ranges) {
            let mut cursor = free.start();
            while cursor + duration <= free.end() {
                // Construction cannot fail: duration > 0 was checked above
                slots.push(TimeRange::new(cursor, cursor + duration).unwrap());
                if slots.len() >= max_results {
                    break 'blocks;
                }
                cursor += duration;
            }
        }
    }
    slots
}
