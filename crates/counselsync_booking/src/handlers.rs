// --- File: crates/counselsync_booking/src/handlers.rs ---
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use counselsync_common::services::CredentialStore;
use counselsync_config::AppConfig;
use counselsync_gcal::GoogleCalendarService;
use counselsync_schedule::TimeRange;
use counselsync_zoom::auth::resolve_credential;
use counselsync_zoom::service::ZoomMeetingService;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::availability::{AvailabilityQuery, AvailabilityResolver};
use crate::coordinator::{
    BookingCoordinator, BookingOutcome, CreateBookingRequest, RescheduleRequest,
};
use crate::error::BookingError;

// Define shared state needed by booking handlers
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub resolver: AvailabilityResolver<GoogleCalendarService>,
    pub coordinator: BookingCoordinator<ZoomMeetingService, GoogleCalendarService>,
    pub credentials: Arc<dyn CredentialStore>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct AvailabilityParams {
    /// Anchor instant, RFC 3339.
    pub from_date: DateTime<Utc>,
    /// Caller's IANA time zone, e.g. "Europe/Zurich".
    pub time_zone: String,
    pub counselor_id: String,
    /// Slot length in minutes; deployment default when omitted.
    pub duration: Option<i64>,
    /// Meeting under reschedule, excluded from blocking itself.
    pub meeting_id: Option<String>,
    pub max_results: Option<usize>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotDto {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T09:00:00Z"))]
    pub start: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T09:30:00Z"))]
    pub end: DateTime<Utc>,
}

impl From<&TimeRange> for SlotDto {
    fn from(range: &TimeRange) -> Self {
        SlotDto {
            start: range.start(),
            end: range.end(),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailabilityResponse {
    pub slots: Vec<SlotDto>,
    /// Echoed computed window bounds.
    pub av_from_time: DateTime<Utc>,
    pub av_to_time: DateTime<Utc>,
}

/// The original client contract for engine errors: 401 answers
/// `{"login": 1}`, a missing upstream resource answers `{"create_new": 1}`,
/// everything else carries its upstream status.
fn booking_error_response(err: BookingError) -> Response {
    match &err {
        BookingError::AuthExpired => {
            (StatusCode::UNAUTHORIZED, Json(json!({ "login": 1 }))).into_response()
        }
        BookingError::ResourceMissing(_) => {
            (StatusCode::OK, Json(json!({ "create_new": 1 }))).into_response()
        }
        BookingError::UnknownCounselor(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        BookingError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        BookingError::Upstream { status, .. } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

fn booking_outcome_response(outcome: BookingOutcome) -> Json<serde_json::Value> {
    match outcome {
        BookingOutcome::Booked {
            meeting,
            calendar_event_id,
        } => Json(json!({
            "status": "booked",
            "meeting": meeting,
            "calendar_event_id": calendar_event_id,
        })),
        // A normal negative result, mirrored from the original client contract
        BookingOutcome::NotAvailable => Json(json!({ "not_available": 1 })),
        BookingOutcome::PartialSuccess {
            meeting,
            meeting_written,
            calendar_mirrored,
            mirror_error,
        } => Json(json!({
            "partial_success": true,
            "meeting": meeting,
            "meeting_written": meeting_written,
            "calendar_mirrored": calendar_mirrored,
            "mirror_error": mirror_error,
        })),
    }
}

fn require_token(headers: &HeaderMap, store: &dyn CredentialStore) -> Result<String, Response> {
    let explicit = headers.get("token").and_then(|value| value.to_str().ok());
    resolve_credential(explicit, store)
        .ok_or_else(|| booking_error_response(BookingError::AuthExpired))
}

/// Handler to get available time slots.
#[axum::debug_handler]
pub async fn availability_handler(
    State(state): State<Arc<BookingState>>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, Response> {
    let query = AvailabilityQuery {
        from: params.from_date,
        duration_minutes: params
            .duration
            .unwrap_or(state.config.availability.default_duration_minutes),
        time_zone: params.time_zone,
        counselor_id: params.counselor_id,
        max_results: params.max_results,
        exclude_meeting_id: params.meeting_id,
    };

    match state.resolver.resolve_slots(&query).await {
        Ok(resolved) => Ok(Json(AvailabilityResponse {
            slots: resolved.slots.iter().map(SlotDto::from).collect(),
            av_from_time: resolved.window.start(),
            av_to_time: resolved.window.end(),
        })),
        Err(err) => {
            warn!("availability query failed: {}", err);
            Err(booking_error_response(err))
        }
    }
}

/// Handler to book a meeting: conflict gate, meeting-provider write, then
/// calendar mirror.
#[axum::debug_handler]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<serde_json::Value>, Response> {
    let token = require_token(&headers, state.credentials.as_ref())?;
    state
        .coordinator
        .create(&token, payload)
        .await
        .map(booking_outcome_response)
        .map_err(booking_error_response)
}

/// Handler to reschedule an existing meeting.
#[axum::debug_handler]
pub async fn reschedule_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(meeting_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<serde_json::Value>, Response> {
    let token = require_token(&headers, state.credentials.as_ref())?;
    state
        .coordinator
        .reschedule(&token, &meeting_id, payload)
        .await
        .map(booking_outcome_response)
        .map_err(booking_error_response)
}

/// Handler to cancel a meeting and remove its calendar mirror.
#[axum::debug_handler]
pub async fn cancel_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(meeting_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, Response> {
    let token = require_token(&headers, state.credentials.as_ref())?;
    match state.coordinator.cancel(&token, &meeting_id).await {
        Ok(outcome) => Ok(Json(json!({
            "meeting_deleted": outcome.meeting_deleted,
            "calendar_removed": outcome.calendar_removed,
        }))),
        Err(err) => Err(booking_error_response(err)),
    }
}
