// --- File: crates/counselsync_booking/src/conflict.rs ---
//! The single admission gate before any provider write.

use std::sync::Arc;

use counselsync_common::services::{CalendarService, CounselorStore};
use counselsync_schedule::interval::conflicts_with;
use counselsync_schedule::TimeRange;
use tracing::debug;

use crate::availability::busy_intervals;
use crate::error::{classify_provider_error, BookingError};

/// Decides whether a candidate range is bookable: entirely inside the
/// counselor's working hours AND free of calendar conflicts.
pub struct ConflictChecker<C: CalendarService> {
    calendar: Arc<C>,
    counselors: Arc<dyn CounselorStore>,
    max_events: usize,
}

impl<C: CalendarService> ConflictChecker<C> {
    pub fn new(
        calendar: Arc<C>,
        counselors: Arc<dyn CounselorStore>,
        max_events: usize,
    ) -> Self {
        Self {
            calendar,
            counselors,
            max_events,
        }
    }

    /// The exact boolean AND of "within working hours" and "no overlap with
    /// busy intervals", using half-open comparison: a range equal to a busy
    /// interval conflicts, a range merely touching one does not.
    ///
    /// Busy intervals are fetched fresh on every call; an earlier verdict is
    /// never reused. `exclude_meeting_id` exempts the interval of a meeting
    /// being rescheduled so it cannot block itself.
    ///
    /// There is no lock spanning the two providers: two concurrent callers
    /// can both pass this gate against the same busy-interval snapshot. The
    /// providers remain the source of truth; see the crate docs.
    pub async fn is_available(
        &self,
        range: TimeRange,
        counselor_id: &str,
        exclude_meeting_id: Option<&str>,
    ) -> Result<bool, BookingError> {
        let hours = self
            .counselors
            .working_hours(counselor_id)
            .ok_or_else(|| BookingError::UnknownCounselor(counselor_id.to_string()))?;

        if !hours.covers(&range) {
            debug!(
                "range {} - {} outside working hours for {}",
                range.start(),
                range.end(),
                counselor_id
            );
            return Ok(false);
        }

        let events = self
            .calendar
            .list_events(range.start(), range.end(), self.max_events)
            .await
            .map_err(classify_provider_error)?;
        let busy = busy_intervals(&events);

        Ok(!conflicts_with(&range, &busy, exclude_meeting_id))
    }
}
