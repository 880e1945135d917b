// --- File: crates/counselsync_zoom/src/routes.rs ---

use crate::handlers::{
    add_registrant_handler, get_meeting_handler, oauth_callback_handler, oauth_logout_handler,
    oauth_refresh_handler, oauth_status_handler, ZoomState,
};
use crate::service::ZoomMeetingService;
use axum::{
    routing::{get, post},
    Router,
};
use counselsync_common::services::CredentialStore;
use counselsync_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the meeting-provider feature.
///
/// The credential store is shared with the booking routes so both see the
/// same session credential.
pub fn routes(config: Arc<AppConfig>, credentials: Arc<dyn CredentialStore>) -> Router {
    let zoom_config = config.zoom.clone().expect("Zoom config missing");
    let zoom_state = Arc::new(ZoomState {
        config,
        service: Arc::new(ZoomMeetingService::new(zoom_config)),
        credentials,
    });

    Router::new()
        .route("/meetings/{meeting_id}", get(get_meeting_handler))
        .route(
            "/meetings/{meeting_id}/registrants",
            post(add_registrant_handler),
        )
        .route("/oauth/callback", get(oauth_callback_handler))
        .route("/oauth/refreshtoken", post(oauth_refresh_handler))
        .route("/oauth", post(oauth_status_handler))
        .route("/oauth/logout", post(oauth_logout_handler))
        .with_state(zoom_state)
}
