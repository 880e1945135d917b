// --- File: crates/counselsync_booking/src/error.rs ---
use counselsync_common::HttpStatusCode;
use thiserror::Error;

/// Booking engine errors.
///
/// `NotAvailable` is deliberately absent: a failed admission check is a
/// normal outcome value, not an error. A partial two-phase write is likewise
/// an outcome (`BookingOutcome::PartialSuccess`), never an `Err`.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Credential missing or expired; the caller must re-authenticate.
    /// Never retried automatically.
    #[error("re-authentication required")]
    AuthExpired,

    /// The meeting or event no longer exists upstream (400/404); surfaced as
    /// "needs recreation", not a fatal crash.
    #[error("upstream resource missing: {0}")]
    ResourceMissing(String),

    /// Any other provider failure, propagated with the original status.
    #[error("upstream provider failure: {message} (Status: {status})")]
    Upstream { status: u16, message: String },

    /// No working hours are configured for the counselor.
    #[error("unknown counselor: {0}")]
    UnknownCounselor(String),

    /// Locally rejected input; no provider call was attempted.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::AuthExpired => 401,
            BookingError::ResourceMissing(_) => 404,
            BookingError::Upstream { status, .. } => *status,
            BookingError::UnknownCounselor(_) => 404,
            BookingError::Validation(_) => 400,
        }
    }
}

/// Classify a provider failure by its upstream status: 401 means
/// re-authenticate, 400/404 mean the resource is gone and needs recreation,
/// anything else is opaque upstream failure.
pub fn classify_provider_error<E>(err: E) -> BookingError
where
    E: std::error::Error + HttpStatusCode,
{
    match err.status_code() {
        401 => BookingError::AuthExpired,
        400 | 404 => BookingError::ResourceMissing(err.to_string()),
        status => BookingError::Upstream {
            status,
            message: err.to_string(),
        },
    }
}
