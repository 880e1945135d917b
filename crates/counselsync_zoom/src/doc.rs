// --- File: crates/counselsync_zoom/src/doc.rs ---
#![allow(dead_code)]
use counselsync_common::services::{Meeting, Registrant, RegistrantRequest};
use utoipa::OpenApi;

/// Documentation for the get_meeting_handler endpoint
#[utoipa::path(
    get,
    path = "/meetings/{meeting_id}",
    params(("meeting_id" = String, Path, description = "Provider-assigned meeting id")),
    responses(
        (status = 200, description = "Meeting details", body = Meeting),
        (status = 401, description = "Re-authentication required"),
    ),
    tag = "Zoom"
)]
fn doc_get_meeting_handler() {}

/// Documentation for the add_registrant_handler endpoint
#[utoipa::path(
    post,
    path = "/meetings/{meeting_id}/registrants",
    params(("meeting_id" = String, Path, description = "Provider-assigned meeting id")),
    request_body = RegistrantRequest,
    responses(
        (status = 200, description = "Registrant confirmed", body = Registrant),
        (status = 401, description = "Re-authentication required"),
    ),
    tag = "Zoom"
)]
fn doc_add_registrant_handler() {}

/// OpenAPI documentation for the meeting-provider API
#[derive(OpenApi)]
#[openapi(
    paths(doc_get_meeting_handler, doc_add_registrant_handler),
    components(schemas(Meeting, Registrant, RegistrantRequest)),
    tags(
        (name = "Zoom", description = "Meeting provider passthrough and OAuth endpoints")
    )
)]
pub struct ZoomApiDoc;
