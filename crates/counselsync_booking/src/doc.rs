// --- File: crates/counselsync_booking/src/doc.rs ---
#![allow(dead_code)]
use utoipa::OpenApi;

use crate::coordinator::{CreateBookingRequest, RescheduleRequest};
use crate::handlers::{AvailabilityParams, AvailabilityResponse, SlotDto};

/// Documentation for the availability_handler endpoint
#[utoipa::path(
    get,
    path = "/calendar/available",
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Bookable slots plus the computed window bounds", body = AvailabilityResponse),
        (status = 400, description = "Invalid time zone or duration"),
        (status = 404, description = "Unknown counselor"),
    ),
    tag = "Booking"
)]
fn doc_availability_handler() {}

/// Documentation for the create_booking_handler endpoint
#[utoipa::path(
    post,
    path = "/meetings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booked, not_available, or partial_success outcome"),
        (status = 401, description = "Re-authentication required"),
    ),
    tag = "Booking"
)]
fn doc_create_booking_handler() {}

/// Documentation for the reschedule_booking_handler endpoint
#[utoipa::path(
    patch,
    path = "/meetings/{meeting_id}",
    params(("meeting_id" = String, Path, description = "Provider-assigned meeting id")),
    request_body = RescheduleRequest,
    responses(
        (status = 200, description = "Booked, not_available, or partial_success outcome"),
        (status = 401, description = "Re-authentication required"),
    ),
    tag = "Booking"
)]
fn doc_reschedule_booking_handler() {}

/// Documentation for the cancel_booking_handler endpoint
#[utoipa::path(
    delete,
    path = "/meetings/{meeting_id}",
    params(("meeting_id" = String, Path, description = "Provider-assigned meeting id")),
    responses(
        (status = 200, description = "Deletion outcome; a missing calendar mirror is reported, not an error"),
        (status = 401, description = "Re-authentication required"),
    ),
    tag = "Booking"
)]
fn doc_cancel_booking_handler() {}

/// OpenAPI documentation for the booking API
#[derive(OpenApi)]
#[openapi(
    paths(
        doc_availability_handler,
        doc_create_booking_handler,
        doc_reschedule_booking_handler,
        doc_cancel_booking_handler
    ),
    components(schemas(
        AvailabilityResponse,
        SlotDto,
        CreateBookingRequest,
        RescheduleRequest
    )),
    tags(
        (name = "Booking", description = "Availability resolution and two-provider booking synchronization")
    )
)]
pub struct BookingApiDoc;
