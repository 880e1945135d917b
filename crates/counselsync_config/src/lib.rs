// --- File: crates/counselsync_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;

pub mod models;
pub use models::{
    AppConfig, AvailabilityConfig, GcalConfig, ServerConfig, WorkingHoursConfig, ZoomConfig,
};

static DOTENV: Lazy<()> = Lazy::new(|| {
    // Missing .env is fine; env vars may come from the environment itself
    dotenv::dotenv().ok();
});

/// Load `.env` exactly once, no matter how many crates ask for config.
pub fn ensure_dotenv_loaded() {
    Lazy::force(&DOTENV);
}

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config/default.*`
/// 2. `config/{RUN_ENV}.*` (RUN_ENV defaults to "default")
/// 3. Environment variables prefixed `APP`, `__` as section separator
///    (e.g. `APP_SERVER__PORT=8086`)
///
/// Malformed working-hours rules are rejected here, at load time, never at
/// query time.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    let config: AppConfig = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()?;

    if let Some(working_hours) = &config.working_hours {
        working_hours
            .to_model()
            .map_err(|err| ConfigError::Message(format!("invalid working hours: {err}")))?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn test_working_hours_config_converts_to_model() {
        let config: WorkingHoursConfig = serde_json::from_value(serde_json::json!({
            "time_zone": "Europe/Zurich",
            "rules": [
                { "weekday": "Mon", "start": "09:00:00", "end": "12:00:00" },
                { "weekday": "Mon", "start": "13:00:00", "end": "17:00:00" }
            ]
        }))
        .unwrap();

        let model = config.to_model().unwrap();
        assert_eq!(model.rules_for(chrono::Weekday::Mon).count(), 2);
    }

    #[test]
    fn test_malformed_rule_rejected_at_parse_time() {
        // start >= end never deserializes
        let result: Result<WorkingHoursConfig, _> = serde_json::from_value(serde_json::json!({
            "time_zone": "UTC",
            "rules": [
                { "weekday": "Mon", "start": "12:00:00", "end": "09:00:00" }
            ]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_overlapping_rules_rejected_by_to_model() {
        let config: WorkingHoursConfig = serde_json::from_value(serde_json::json!({
            "time_zone": "UTC",
            "rules": [
                { "weekday": "Mon", "start": "09:00:00", "end": "12:00:00" },
                { "weekday": "Mon", "start": "11:00:00", "end": "14:00:00" }
            ]
        }))
        .unwrap();
        assert!(config.to_model().is_err());
    }

    #[test]
    fn test_unknown_time_zone_rejected() {
        let config: WorkingHoursConfig = serde_json::from_value(serde_json::json!({
            "time_zone": "Mars/Olympus_Mons",
            "rules": []
        }))
        .unwrap();
        assert!(config.to_model().is_err());
    }

    #[test]
    fn test_availability_defaults() {
        let availability = AvailabilityConfig::default();
        assert_eq!(availability.window_days, 1);
        assert_eq!(availability.max_events, 100);
        assert_eq!(availability.default_duration_minutes, 15);
    }
}
