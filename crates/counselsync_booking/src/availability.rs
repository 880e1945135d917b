// --- File: crates/counselsync_booking/src/availability.rs ---
//! Read-side slot resolution.
//!
//! The resolver fetches calendar occupancy fresh on every call and hands the
//! pure computation to `counselsync_schedule`; there is no cached cursor and
//! no state between calls.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use counselsync_common::services::{CalendarEvent, CalendarService, CounselorStore};
use counselsync_config::AvailabilityConfig;
use counselsync_schedule::interval::BusyInterval;
use counselsync_schedule::slots::slots_for_window;
use counselsync_schedule::TimeRange;
use tracing::debug;

use crate::error::{classify_provider_error, BookingError};

/// Parameters of one availability query.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    /// Anchor instant the window starts at.
    pub from: DateTime<Utc>,
    pub duration_minutes: i64,
    /// Caller's IANA time zone; the window runs to the end of the anchor's
    /// local day in this zone.
    pub time_zone: String,
    pub counselor_id: String,
    pub max_results: Option<usize>,
    /// Meeting under reschedule whose own busy interval must not block it.
    pub exclude_meeting_id: Option<String>,
}

/// Ordered slot sequence plus the echoed window bounds.
#[derive(Debug, Clone)]
pub struct AvailabilitySlots {
    pub window: TimeRange,
    pub slots: Vec<TimeRange>,
}

/// Compute the availability window: from the anchor through the end of that
/// local day in `tz`, extended over `window_days` whole local days. This is
/// the one window policy every call site uses.
pub fn availability_window(
    from: DateTime<Utc>,
    tz: Tz,
    window_days: u32,
) -> Result<TimeRange, BookingError> {
    let local_date = from.with_timezone(&tz).date_naive();
    let end_date = local_date + chrono::Days::new(window_days.max(1) as u64);
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let end_local = tz
        .from_local_datetime(&end_date.and_time(midnight))
        .earliest()
        .ok_or_else(|| {
            BookingError::Validation(format!("window end is not a valid instant in {tz}"))
        })?;
    TimeRange::new(from, end_local.with_timezone(&Utc))
        .map_err(|err| BookingError::Validation(err.to_string()))
}

/// Map calendar events to busy intervals, tagging each with the id a
/// reschedule would exclude. Events with degenerate ranges are skipped.
pub fn busy_intervals(events: &[CalendarEvent]) -> Vec<BusyInterval> {
    events
        .iter()
        .filter_map(|event| {
            let range = TimeRange::new(event.start_time, event.end_time).ok()?;
            let source = event.meeting_id.clone().unwrap_or_else(|| event.id.clone());
            Some(BusyInterval::new(range, Some(source)))
        })
        .collect()
}

/// Resolves bookable slots for a counselor from working hours minus
/// calendar occupancy.
pub struct AvailabilityResolver<C: CalendarService> {
    calendar: Arc<C>,
    counselors: Arc<dyn CounselorStore>,
    availability: AvailabilityConfig,
}

impl<C: CalendarService> AvailabilityResolver<C> {
    pub fn new(
        calendar: Arc<C>,
        counselors: Arc<dyn CounselorStore>,
        availability: AvailabilityConfig,
    ) -> Self {
        Self {
            calendar,
            counselors,
            availability,
        }
    }

    /// Resolve the ordered bookable slots for the query. Recomputed fresh on
    /// every call; identical inputs against an unchanged calendar yield
    /// identical output.
    pub async fn resolve_slots(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilitySlots, BookingError> {
        if query.duration_minutes <= 0 {
            return Err(BookingError::Validation(format!(
                "non-positive duration: {}",
                query.duration_minutes
            )));
        }
        let tz = Tz::from_str(&query.time_zone)
            .map_err(|_| BookingError::Validation(format!("unknown time zone: {}", query.time_zone)))?;

        let hours = self
            .counselors
            .working_hours(&query.counselor_id)
            .ok_or_else(|| BookingError::UnknownCounselor(query.counselor_id.clone()))?;

        let window = availability_window(query.from, tz, self.availability.window_days)?;

        // Busy intervals are fetched per call, bounded by the configured
        // page size to cap provider load
        let events = self
            .calendar
            .list_events(window.start(), window.end(), self.availability.max_events)
            .await
            .map_err(classify_provider_error)?;
        let busy = busy_intervals(&events);

        let max_results = query.max_results.unwrap_or(self.availability.max_events);
        let slots = slots_for_window(
            &hours,
            window,
            Duration::minutes(query.duration_minutes),
            &busy,
            query.exclude_meeting_id.as_deref(),
            max_results,
        );
        debug!(
            "resolved {} slots for counselor {} in window {} - {}",
            slots.len(),
            query.counselor_id,
            window.start(),
            window.end()
        );
        Ok(AvailabilitySlots { window, slots })
    }
}
