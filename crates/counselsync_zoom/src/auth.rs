// --- File: crates/counselsync_zoom/src/auth.rs ---
//! Access-credential lifecycle for the meeting provider.
//!
//! A credential is created on OAuth exchange, persisted per session through
//! the [`CredentialStore`] collaborator, invalidated on detected expiry or
//! explicit logout, and replaced wholesale on refresh. Nothing here makes a
//! network call except the explicit exchange/refresh operations; expiry
//! checking is purely local.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use counselsync_common::services::CredentialStore;
use counselsync_common::HTTP_CLIENT;
use counselsync_config::ZoomConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ZoomError;

/// An OAuth access credential with its expiry bookkeeping.
///
/// `ttl_seconds > 0` and a non-empty access token are enforced at
/// construction; a stored blob that violates them fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawCredential")]
pub struct AccessCredential {
    access_token: String,
    refresh_token: Option<String>,
    issued_at: DateTime<Utc>,
    ttl_seconds: i64,
}

#[derive(Deserialize)]
struct RawCredential {
    access_token: String,
    refresh_token: Option<String>,
    issued_at: DateTime<Utc>,
    ttl_seconds: i64,
}

impl TryFrom<RawCredential> for AccessCredential {
    type Error = ZoomError;

    fn try_from(raw: RawCredential) -> Result<Self, Self::Error> {
        AccessCredential::new(
            raw.access_token,
            raw.refresh_token,
            raw.issued_at,
            raw.ttl_seconds,
        )
    }
}

impl AccessCredential {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        issued_at: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Result<Self, ZoomError> {
        if access_token.is_empty() {
            return Err(ZoomError::InvalidCredential(
                "empty access token".to_string(),
            ));
        }
        if ttl_seconds <= 0 {
            return Err(ZoomError::InvalidCredential(format!(
                "non-positive ttl_seconds: {ttl_seconds}"
            )));
        }
        Ok(Self {
            access_token,
            refresh_token,
            issued_at,
            ttl_seconds,
        })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Expired iff `now >= issued_at + ttl_seconds`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.issued_at + Duration::seconds(self.ttl_seconds)
    }
}

/// Resolve the caller's access token.
///
/// An explicitly supplied token always wins (the caller authenticated out of
/// band). Otherwise the stored credential is parsed; an expired or
/// unparseable credential is cleared from the store and `None` is returned,
/// which callers must treat as "re-authenticate", never as an empty token.
pub fn resolve_credential(explicit: Option<&str>, store: &dyn CredentialStore) -> Option<String> {
    if let Some(token) = explicit {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    let stored = store.get()?;
    let credential: AccessCredential = match serde_json::from_str(&stored) {
        Ok(credential) => credential,
        Err(err) => {
            debug!("clearing unparseable stored credential: {}", err);
            store.clear();
            return None;
        }
    };

    if credential.is_expired(Utc::now()) {
        debug!("stored credential expired, clearing");
        store.clear();
        return None;
    }

    Some(credential.access_token)
}

/// Persist a credential, replacing any previous one wholesale.
pub fn store_credential(
    store: &dyn CredentialStore,
    credential: &AccessCredential,
) -> Result<(), ZoomError> {
    let json = serde_json::to_string(credential)?;
    store.set(json);
    Ok(())
}

#[derive(Deserialize, Debug)]
struct TokenEndpointResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

/// Exchange an OAuth authorization code for a fresh credential.
pub async fn exchange_code_for_credential(
    config: &ZoomConfig,
    code: &str,
) -> Result<AccessCredential, ZoomError> {
    request_token(
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .await
}

/// Exchange a refresh token for a fresh credential. This is the explicit
/// refresh path; nothing refreshes automatically.
pub async fn refresh_access_credential(
    config: &ZoomConfig,
    refresh_token: &str,
) -> Result<AccessCredential, ZoomError> {
    request_token(
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    config: &ZoomConfig,
    params: &[(&str, &str)],
) -> Result<AccessCredential, ZoomError> {
    // Secret is never part of the config file
    let client_secret =
        std::env::var("ZOOM_CLIENT_SECRET").map_err(|_| ZoomError::ConfigError)?;

    let url = format!("{}/token", config.oauth_base_url);
    let response = HTTP_CLIENT
        .post(&url)
        .basic_auth(&config.client_id, Some(client_secret))
        .form(params)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ZoomError::ApiError {
            status_code: status.as_u16(),
            message,
        });
    }

    let token: TokenEndpointResponse = response.json().await?;
    info!("obtained meeting-provider credential, ttl {}s", token.expires_in);
    AccessCredential::new(
        token.access_token,
        token.refresh_token,
        Utc::now(),
        token.expires_in,
    )
}

/// Session-scoped in-memory credential store.
///
/// Writes are last-writer-wins, which is acceptable for a per-user
/// credential whose refreshes are rare relative to reads.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credential: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.credential.lock().unwrap().clone()
    }

    fn set(&self, credential_json: String) {
        *self.credential.lock().unwrap() = Some(credential_json);
    }

    fn clear(&self) {
        *self.credential.lock().unwrap() = None;
    }
}
