// --- File: crates/counselsync_zoom/src/handlers.rs ---
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use counselsync_common::services::{CredentialStore, MeetingService, RegistrantRequest};
use counselsync_common::{config_error, HttpStatusCode};
use counselsync_config::AppConfig;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::{
    exchange_code_for_credential, refresh_access_credential, resolve_credential, store_credential,
};
use crate::error::ZoomError;
use crate::service::ZoomMeetingService;

// Define shared state needed by Zoom handlers
#[derive(Clone)]
pub struct ZoomState {
    pub config: Arc<AppConfig>,
    pub service: Arc<ZoomMeetingService>,
    pub credentials: Arc<dyn CredentialStore>,
}

/// The original client contract: 401 answers `{"login": 1}` (re-authenticate),
/// a missing upstream resource answers `{"create_new": 1}`, anything else
/// propagates the upstream status.
pub fn provider_error_response(err: &ZoomError) -> Response {
    match err.status_code() {
        401 => (StatusCode::UNAUTHORIZED, Json(json!({ "login": 1 }))).into_response(),
        400 | 404 => (StatusCode::OK, Json(json!({ "create_new": 1 }))).into_response(),
        status => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

fn explicit_token(headers: &HeaderMap) -> Option<&str> {
    headers.get("token").and_then(|value| value.to_str().ok())
}

fn require_token(headers: &HeaderMap, store: &dyn CredentialStore) -> Result<String, Response> {
    resolve_credential(explicit_token(headers), store).ok_or_else(|| {
        (StatusCode::UNAUTHORIZED, Json(json!({ "login": 1 }))).into_response()
    })
}

/// Handler to fetch a meeting from the provider.
#[axum::debug_handler]
pub async fn get_meeting_handler(
    State(state): State<Arc<ZoomState>>,
    Path(meeting_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, Response> {
    let token = require_token(&headers, state.credentials.as_ref())?;
    match state.service.get_meeting(&token, &meeting_id).await {
        Ok(meeting) => Ok(Json(json!(meeting))),
        Err(err) => {
            warn!("get_meeting failed: {}", err);
            Err(provider_error_response(&err))
        }
    }
}

/// Handler to register an attendee for a meeting.
#[axum::debug_handler]
pub async fn add_registrant_handler(
    State(state): State<Arc<ZoomState>>,
    Path(meeting_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<RegistrantRequest>,
) -> Result<Json<serde_json::Value>, Response> {
    let token = require_token(&headers, state.credentials.as_ref())?;
    match state
        .service
        .add_registrant(&token, &meeting_id, payload)
        .await
    {
        Ok(registrant) => Ok(Json(json!(registrant))),
        Err(err) => {
            warn!("add_registrant failed: {}", err);
            Err(provider_error_response(&err))
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// OAuth callback: with a code, exchange it and persist the credential;
/// without one, redirect the browser to the provider's authorize page.
#[axum::debug_handler]
pub async fn oauth_callback_handler(
    State(state): State<Arc<ZoomState>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<Response, Response> {
    let Some(zoom_config) = state.config.zoom.as_ref() else {
        return Err(config_error("Zoom configuration missing").into_response());
    };

    match query.code {
        Some(code) => {
            let credential = exchange_code_for_credential(zoom_config, &code)
                .await
                .map_err(|err| {
                    (StatusCode::BAD_REQUEST, format!("Invalid code: {err}")).into_response()
                })?;
            store_credential(state.credentials.as_ref(), &credential)
                .map_err(|err| {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
                })?;
            info!("stored credential from oauth exchange");
            Ok(Json(json!({ "success": 1 })).into_response())
        }
        None => {
            let authorize_url = format!(
                "{}/authorize?response_type=code&client_id={}&redirect_uri={}",
                zoom_config.oauth_base_url, zoom_config.client_id, zoom_config.redirect_uri
            );
            Ok(Redirect::temporary(&authorize_url).into_response())
        }
    }
}

/// Explicit refresh: exchange the refresh token and replace the stored
/// credential wholesale.
#[axum::debug_handler]
pub async fn oauth_refresh_handler(
    State(state): State<Arc<ZoomState>>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<serde_json::Value>, Response> {
    let Some(zoom_config) = state.config.zoom.as_ref() else {
        return Err(config_error("Zoom configuration missing").into_response());
    };

    match refresh_access_credential(zoom_config, &payload.refresh_token).await {
        Ok(credential) => {
            store_credential(state.credentials.as_ref(), &credential)
                .map_err(|err| {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
                })?;
            Ok(Json(json!(credential)))
        }
        Err(err) => {
            warn!("refresh failed: {}", err);
            Err(provider_error_response(&err))
        }
    }
}

/// Report whether the session currently holds a usable credential.
#[axum::debug_handler]
pub async fn oauth_status_handler(
    State(state): State<Arc<ZoomState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let token = resolve_credential(explicit_token(&headers), state.credentials.as_ref());
    Json(json!({
        "auth": if token.is_some() { 1 } else { 0 },
        "token": token,
    }))
}

/// Drop the stored credential.
#[axum::debug_handler]
pub async fn oauth_logout_handler(State(state): State<Arc<ZoomState>>) -> Json<serde_json::Value> {
    state.credentials.clear();
    Json(json!({ "success": 1 }))
}
