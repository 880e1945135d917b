// --- File: crates/counselsync_booking/src/coordinator.rs ---
//! Two-phase write coordination across the meeting and calendar providers.
//!
//! Each booking intent walks CHECKING -> PROVIDER_WRITE -> CALENDAR_MIRROR
//! strictly in order; each step's outcome gates the next and nothing runs in
//! parallel. There is no transaction spanning the two providers, so the
//! saga's intermediate state is observable: when the meeting write succeeds
//! and the mirror write fails, the result is an explicit `PartialSuccess`
//! rather than a rollback (a compensating delete could itself fail and mask
//! the original error). Nothing here retries; retries, if any, belong to the
//! transport.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use counselsync_common::services::{
    CalendarEventDraft, CalendarService, Meeting, MeetingPatch, MeetingService, MeetingSpec,
};
use counselsync_common::HttpStatusCode;
use counselsync_schedule::TimeRange;
use serde::Deserialize;
use tracing::{info, warn};

use crate::conflict::ConflictChecker;
use crate::error::{classify_provider_error, BookingError};

/// Result of a create or reschedule intent.
///
/// `NotAvailable` and `PartialSuccess` are normal outcomes, not errors:
/// the first is the gate's negative verdict, the second records that the
/// meeting write landed while the calendar mirror did not.
#[derive(Debug)]
pub enum BookingOutcome {
    /// Both provider writes succeeded.
    Booked {
        meeting: Meeting,
        calendar_event_id: String,
    },
    /// The admission gate rejected the range.
    NotAvailable,
    /// The meeting exists but its calendar mirror could not be written.
    /// Carries everything a reconciliation pass needs.
    PartialSuccess {
        meeting: Meeting,
        meeting_written: bool,
        calendar_mirrored: bool,
        mirror_error: String,
    },
}

/// Result of a cancel intent. A missing calendar mirror is not an error.
#[derive(Debug)]
pub struct CancelOutcome {
    pub meeting_deleted: bool,
    pub calendar_removed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateBookingRequest {
    pub counselor_id: String,
    pub topic: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RescheduleRequest {
    pub counselor_id: String,
    pub start_time: DateTime<Utc>,
}

/// Builds the mirror event description from the meeting's provider-issued
/// secrets. They are embedded verbatim, never interpreted.
fn mirror_description(meeting: &Meeting) -> String {
    format!(
        "Password: {}\nStart Url: {}\nJoin Url: {}",
        meeting.password.as_deref().unwrap_or(""),
        meeting.start_url.as_deref().unwrap_or(""),
        meeting.join_url.as_deref().unwrap_or(""),
    )
}

fn mirror_draft(meeting: &Meeting, range: TimeRange) -> CalendarEventDraft {
    CalendarEventDraft {
        meeting_id: Some(meeting.id.clone()),
        start_time: range.start(),
        end_time: range.end(),
        summary: meeting.topic.clone(),
        description: Some(mirror_description(meeting)),
    }
}

fn booking_range(start: DateTime<Utc>, duration_minutes: i64) -> Result<TimeRange, BookingError> {
    if duration_minutes <= 0 {
        return Err(BookingError::Validation(format!(
            "non-positive duration: {duration_minutes}"
        )));
    }
    TimeRange::new(start, start + Duration::minutes(duration_minutes))
        .map_err(|err| BookingError::Validation(err.to_string()))
}

/// Orchestrates create / reschedule / cancel across the two providers.
pub struct BookingCoordinator<M: MeetingService, C: CalendarService> {
    meetings: Arc<M>,
    calendar: Arc<C>,
    gate: ConflictChecker<C>,
}

impl<M, C> BookingCoordinator<M, C>
where
    M: MeetingService,
    C: CalendarService,
{
    pub fn new(meetings: Arc<M>, calendar: Arc<C>, gate: ConflictChecker<C>) -> Self {
        Self {
            meetings,
            calendar,
            gate,
        }
    }

    /// Create a meeting and mirror it onto the calendar.
    pub async fn create(
        &self,
        token: &str,
        request: CreateBookingRequest,
    ) -> Result<BookingOutcome, BookingError> {
        // Local validation first: fail fast, fail local
        let range = booking_range(request.start_time, request.duration_minutes)?;

        // CHECKING
        if !self
            .gate
            .is_available(range, &request.counselor_id, None)
            .await?
        {
            return Ok(BookingOutcome::NotAvailable);
        }

        // PROVIDER_WRITE
        let meeting = self
            .meetings
            .create_meeting(
                token,
                MeetingSpec {
                    topic: request.topic,
                    start_time: range.start(),
                    duration_minutes: request.duration_minutes,
                    agenda: None,
                },
            )
            .await
            .map_err(classify_provider_error)?;
        info!("created meeting {}", meeting.id);

        // CALENDAR_MIRROR
        match self.calendar.add_event(mirror_draft(&meeting, range)).await {
            Ok(event) => Ok(BookingOutcome::Booked {
                meeting,
                calendar_event_id: event.id,
            }),
            Err(err) => {
                warn!(
                    "meeting {} created but calendar mirror failed: {} (status {})",
                    meeting.id,
                    err,
                    err.status_code()
                );
                Ok(BookingOutcome::PartialSuccess {
                    meeting,
                    meeting_written: true,
                    calendar_mirrored: false,
                    mirror_error: err.to_string(),
                })
            }
        }
    }

    /// Move an existing meeting to a new start time, keeping its duration,
    /// and bring the calendar mirror along — creating it if it has drifted
    /// away.
    pub async fn reschedule(
        &self,
        token: &str,
        meeting_id: &str,
        request: RescheduleRequest,
    ) -> Result<BookingOutcome, BookingError> {
        let meeting = self
            .meetings
            .get_meeting(token, meeting_id)
            .await
            .map_err(classify_provider_error)?;
        let mirror = self
            .calendar
            .get_event(meeting_id)
            .await
            .map_err(classify_provider_error)?;

        let range = booking_range(request.start_time, meeting.duration_minutes)?;

        // CHECKING, with the meeting's own interval excluded so it cannot
        // block itself
        if !self
            .gate
            .is_available(range, &request.counselor_id, Some(meeting_id))
            .await?
        {
            return Ok(BookingOutcome::NotAvailable);
        }

        // PROVIDER_WRITE
        self.meetings
            .edit_meeting(
                token,
                meeting_id,
                MeetingPatch {
                    start_time: Some(range.start()),
                    ..Default::default()
                },
            )
            .await
            .map_err(classify_provider_error)?;

        let moved = Meeting {
            start_time: range.start(),
            ..meeting
        };

        // CALENDAR_MIRROR: update in place, or heal a missing mirror
        let draft = mirror_draft(&moved, range);
        let mirror_result = match &mirror {
            Some(event) => self
                .calendar
                .update_event(&event.id, draft)
                .await
                .map(|_| event.id.clone()),
            None => {
                info!("meeting {} had no calendar mirror, creating one", meeting_id);
                self.calendar.add_event(draft).await.map(|event| event.id)
            }
        };

        match mirror_result {
            Ok(calendar_event_id) => Ok(BookingOutcome::Booked {
                meeting: moved,
                calendar_event_id,
            }),
            Err(err) => {
                warn!(
                    "meeting {} rescheduled but calendar mirror failed: {}",
                    meeting_id, err
                );
                Ok(BookingOutcome::PartialSuccess {
                    meeting: moved,
                    meeting_written: true,
                    calendar_mirrored: false,
                    mirror_error: err.to_string(),
                })
            }
        }
    }

    /// Delete the meeting, then best-effort delete its mirror. A mirror that
    /// is already gone is not an error.
    pub async fn cancel(
        &self,
        token: &str,
        meeting_id: &str,
    ) -> Result<CancelOutcome, BookingError> {
        self.meetings
            .delete_meeting(token, meeting_id)
            .await
            .map_err(classify_provider_error)?;
        info!("deleted meeting {}", meeting_id);

        let calendar_removed = match self.calendar.delete_event(meeting_id).await {
            Ok(()) => true,
            Err(err) => {
                if !matches!(err.status_code(), 400 | 404) {
                    warn!(
                        "calendar mirror delete for {} failed: {} (status {})",
                        meeting_id,
                        err,
                        err.status_code()
                    );
                }
                false
            }
        };

        Ok(CancelOutcome {
            meeting_deleted: true,
            calendar_removed,
        })
    }
}
