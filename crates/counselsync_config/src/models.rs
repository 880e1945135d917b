// --- File: crates/counselsync_config/src/models.rs ---

use std::str::FromStr;

use chrono_tz::Tz;
use counselsync_schedule::{ScheduleError, WorkingHours, WorkingHoursRule};
use serde::Deserialize;

// --- General Server Config ---
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Meeting Provider (Zoom) Config ---
// Holds non-secret Zoom config. Secrets loaded directly from env vars:
// ZOOM_CLIENT_SECRET
#[derive(Debug, Deserialize, Clone)]
pub struct ZoomConfig {
    #[serde(default = "default_zoom_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_zoom_oauth_base_url")]
    pub oauth_base_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    /// Provider user the meetings are created under.
    #[serde(default = "default_zoom_user_id")]
    pub user_id: String,
}

fn default_zoom_api_base_url() -> String {
    "https://api.zoom.us/v2".to_string()
}

fn default_zoom_oauth_base_url() -> String {
    "https://zoom.us/oauth".to_string()
}

fn default_zoom_user_id() -> String {
    "me".to_string()
}

// --- Calendar Provider (Google Calendar) Config ---
// Bearer token loaded directly from env var: GCAL_API_TOKEN
#[derive(Debug, Deserialize, Clone)]
pub struct GcalConfig {
    #[serde(default = "default_gcal_api_base_url")]
    pub api_base_url: String,
    pub calendar_id: Option<String>,
}

fn default_gcal_api_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

// --- Availability Window Policy ---
/// The availability window starts at the query anchor and runs through the
/// end of that local day in the caller's time zone; `window_days` extends it
/// over further whole local days. One policy for every call site.
#[derive(Debug, Deserialize, Clone)]
pub struct AvailabilityConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Page-size cap on the busy-interval query, to bound provider load.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: i64,
}

fn default_window_days() -> u32 {
    1
}

fn default_max_events() -> usize {
    100
}

fn default_duration_minutes() -> i64 {
    15
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            max_events: default_max_events(),
            default_duration_minutes: default_duration_minutes(),
        }
    }
}

// --- Working Hours Config ---
/// Raw working-hours section. Each rule is validated while deserializing
/// (start < end); cross-rule overlap and the time zone are checked by
/// [`WorkingHoursConfig::to_model`], which `load_config` runs so malformed
/// configuration never reaches query time.
#[derive(Debug, Deserialize, Clone)]
pub struct WorkingHoursConfig {
    pub time_zone: String,
    pub rules: Vec<WorkingHoursRule>,
}

impl WorkingHoursConfig {
    pub fn to_model(&self) -> Result<WorkingHours, ScheduleError> {
        let tz = Tz::from_str(&self.time_zone)
            .map_err(|_| ScheduleError::UnknownTimeZone(self.time_zone.clone()))?;
        WorkingHours::new(tz, self.rules.clone())
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_zoom: bool,
    #[serde(default)]
    pub use_gcal: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub zoom: Option<ZoomConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,

    #[serde(default)]
    pub availability: AvailabilityConfig,

    /// Default working hours applied to counselors without their own
    /// document in the counselor store.
    #[serde(default)]
    pub working_hours: Option<WorkingHoursConfig>,
}
