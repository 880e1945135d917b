// --- File: crates/counselsync_gcal/src/error.rs ---
use counselsync_common::HttpStatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalError {
    /// Error occurred during a Google Calendar API request
    #[error("Google Calendar API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Google Calendar API
    #[error("Google Calendar API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a Google Calendar API response
    #[error("Failed to parse Google Calendar response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete calendar configuration
    #[error("Calendar configuration missing or incomplete: {0}")]
    ConfigError(String),
}

impl HttpStatusCode for GcalError {
    fn status_code(&self) -> u16 {
        match self {
            GcalError::ApiError { status_code, .. } => *status_code,
            GcalError::RequestError(_) => 502,
            GcalError::ParseError(_) => 502,
            GcalError::ConfigError(_) => 500,
        }
    }
}
