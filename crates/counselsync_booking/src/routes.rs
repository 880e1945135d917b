// --- File: crates/counselsync_booking/src/routes.rs ---

use crate::availability::AvailabilityResolver;
use crate::conflict::ConflictChecker;
use crate::coordinator::BookingCoordinator;
use crate::handlers::{
    availability_handler, cancel_booking_handler, create_booking_handler,
    reschedule_booking_handler, BookingState,
};
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use counselsync_common::services::{CounselorStore, CredentialStore};
use counselsync_config::AppConfig;
use counselsync_gcal::GoogleCalendarService;
use counselsync_zoom::service::ZoomMeetingService;
use std::sync::Arc;

/// Creates a router containing all routes for the booking engine.
///
/// The credential store is the same one the OAuth routes write to; the
/// counselor store supplies working hours.
pub fn routes(
    config: Arc<AppConfig>,
    credentials: Arc<dyn CredentialStore>,
    counselors: Arc<dyn CounselorStore>,
) -> Router {
    let zoom_config = config.zoom.clone().expect("Zoom config missing");
    let gcal_config = config.gcal.clone().expect("GCal config missing");

    let meetings = Arc::new(ZoomMeetingService::new(zoom_config));
    let calendar = Arc::new(
        GoogleCalendarService::new(gcal_config).expect("calendar service init failed"),
    );

    let availability = config.availability.clone();
    let resolver = AvailabilityResolver::new(
        calendar.clone(),
        counselors.clone(),
        availability.clone(),
    );
    let gate = ConflictChecker::new(calendar.clone(), counselors, availability.max_events);
    let coordinator = BookingCoordinator::new(meetings, calendar, gate);

    let state = Arc::new(BookingState {
        config,
        resolver,
        coordinator,
        credentials,
    });

    Router::new()
        .route("/calendar/available", get(availability_handler))
        .route("/meetings", post(create_booking_handler))
        .route("/meetings/{meeting_id}", patch(reschedule_booking_handler))
        .route("/meetings/{meeting_id}", delete(cancel_booking_handler))
        .with_state(state)
}
