// --- File: crates/counselsync_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Counselsync errors.
///
/// This enum provides a common set of error variants that can be used across
/// crates. Each crate can extend this by implementing From<SpecificError> for
/// CounselsyncError.
#[derive(Error, Debug)]
pub enum CounselsyncError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., slot already taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// Provider adapters implement this so the engine can classify upstream
/// failures (401 re-authenticate, 400/404 resource missing, else opaque)
/// without knowing the adapter's wire format.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CounselsyncError {
    fn status_code(&self) -> u16 {
        match self {
            CounselsyncError::HttpError(_) => 500,
            CounselsyncError::ParseError(_) => 400,
            CounselsyncError::ConfigError(_) => 500,
            CounselsyncError::AuthError(_) => 401,
            CounselsyncError::ValidationError(_) => 400,
            CounselsyncError::ExternalServiceError { .. } => 502,
            CounselsyncError::ConflictError(_) => 409,
            CounselsyncError::NotFoundError(_) => 404,
            CounselsyncError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for CounselsyncError {
    fn from(err: reqwest::Error) -> Self {
        CounselsyncError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CounselsyncError {
    fn from(err: serde_json::Error) -> Self {
        CounselsyncError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CounselsyncError {
    CounselsyncError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> CounselsyncError {
    CounselsyncError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> CounselsyncError {
    CounselsyncError::NotFoundError(message.to_string())
}

pub fn external_service_error<S: fmt::Display, M: fmt::Display>(
    service_name: S,
    message: M,
) -> CounselsyncError {
    CounselsyncError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> CounselsyncError {
    CounselsyncError::InternalError(message.to_string())
}
