// --- File: crates/counselsync_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! This module defines the narrow contracts the booking engine consumes: the
//! meeting provider that hosts the video call, the calendar provider that
//! records busy time, the per-session credential store, and the counselor
//! document store. Trait objects over these contracts keep the engine
//! testable without any provider SDK in the loop.

use chrono::{DateTime, Utc};
use counselsync_schedule::working_hours::WorkingHours;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

use crate::error::HttpStatusCode;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A meeting hosted by the meeting provider.
///
/// `password`, `join_url` and `start_url` are provider-issued secrets; they
/// are carried through opaquely and never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Meeting {
    /// Provider-assigned meeting id.
    pub id: String,
    pub topic: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub password: Option<String>,
    pub join_url: Option<String>,
    pub start_url: Option<String>,
}

/// Parameters for creating a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MeetingSpec {
    pub topic: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub agenda: Option<String>,
}

/// Partial update applied to an existing meeting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MeetingPatch {
    pub topic: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
}

/// Registration request for a meeting attendee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrantRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// A confirmed meeting registrant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Registrant {
    pub id: String,
    pub join_url: Option<String>,
}

/// An event recorded on the calendar provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarEvent {
    /// Provider-assigned event id.
    pub id: String,
    /// Id of the mirrored meeting, absent when the event is not a mirror.
    pub meeting_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub summary: String,
    pub description: Option<String>,
}

/// Event payload for create/update calls.
///
/// When `meeting_id` is set, the adapter keys the stored event by it so the
/// mirror of a meeting can later be looked up with `get_event(meeting_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarEventDraft {
    pub meeting_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub summary: String,
    pub description: Option<String>,
}

/// A trait for meeting provider operations.
///
/// The access token is threaded through every call; the engine never holds a
/// process-wide token. Errors expose the upstream HTTP status through
/// [`HttpStatusCode`] so callers can tell "re-authenticate" (401) apart from
/// "resource gone, needs recreation" (400/404) and opaque upstream failure.
pub trait MeetingService: Send + Sync {
    /// Error type returned by meeting provider operations.
    type Error: std::error::Error + HttpStatusCode + Send + Sync + 'static;

    /// Create a meeting.
    fn create_meeting(&self, token: &str, spec: MeetingSpec)
        -> BoxFuture<'_, Meeting, Self::Error>;

    /// Fetch a meeting by id.
    fn get_meeting(&self, token: &str, meeting_id: &str) -> BoxFuture<'_, Meeting, Self::Error>;

    /// Apply a partial update to a meeting.
    fn edit_meeting(
        &self,
        token: &str,
        meeting_id: &str,
        patch: MeetingPatch,
    ) -> BoxFuture<'_, (), Self::Error>;

    /// Delete a meeting.
    fn delete_meeting(&self, token: &str, meeting_id: &str) -> BoxFuture<'_, (), Self::Error>;

    /// Register an attendee for a meeting.
    fn add_registrant(
        &self,
        token: &str,
        meeting_id: &str,
        registrant: RegistrantRequest,
    ) -> BoxFuture<'_, Registrant, Self::Error>;
}

/// A trait for calendar provider operations.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar provider operations.
    type Error: std::error::Error + HttpStatusCode + Send + Sync + 'static;

    /// List events within a time range, bounded by `max_results`.
    fn list_events(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        max_results: usize,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error>;

    /// Whether the range is completely free of events.
    fn free_busy(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> BoxFuture<'_, bool, Self::Error>;

    /// Create an event.
    fn add_event(&self, event: CalendarEventDraft) -> BoxFuture<'_, CalendarEvent, Self::Error>;

    /// Replace an existing event's content.
    fn update_event(
        &self,
        event_id: &str,
        event: CalendarEventDraft,
    ) -> BoxFuture<'_, (), Self::Error>;

    /// Delete an event.
    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error>;

    /// Fetch an event by id; `None` when the event does not exist.
    fn get_event(&self, event_id: &str) -> BoxFuture<'_, Option<CalendarEvent>, Self::Error>;
}

/// Opaque get/set of a serialized access credential, scoped to the caller's
/// session. Writes are last-writer-wins; refreshes replace the value
/// wholesale.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, credential_json: String);
    fn clear(&self);
}

/// Key-value document store holding each counselor's working hours.
pub trait CounselorStore: Send + Sync {
    fn working_hours(&self, counselor_id: &str) -> Option<WorkingHours>;
    fn put(&self, counselor_id: &str, hours: WorkingHours);
}
