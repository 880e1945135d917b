// --- File: crates/counselsync_zoom/src/error.rs ---
use counselsync_common::HttpStatusCode;
use thiserror::Error;

/// Zoom-specific error types.
#[derive(Error, Debug)]
pub enum ZoomError {
    /// Error occurred during a Zoom API request
    #[error("Zoom API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Zoom API
    #[error("Zoom API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a Zoom API response
    #[error("Failed to parse Zoom API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Zoom configuration
    #[error("Zoom configuration missing or incomplete")]
    ConfigError,

    /// Stored credential is invalid
    #[error("Invalid access credential: {0}")]
    InvalidCredential(String),
}

impl HttpStatusCode for ZoomError {
    fn status_code(&self) -> u16 {
        match self {
            // The upstream status is what the engine classifies on:
            // 401 re-authenticate, 400/404 resource missing
            ZoomError::ApiError { status_code, .. } => *status_code,
            ZoomError::RequestError(_) => 502,
            ZoomError::ParseError(_) => 502,
            ZoomError::ConfigError => 500,
            ZoomError::InvalidCredential(_) => 401,
        }
    }
}
