// --- File: crates/counselsync_booking/src/store.rs ---
//! Counselor working-hours store.
//!
//! The persistent document store behind this contract is an external
//! collaborator; this in-memory implementation is seeded from configuration
//! and covers single-instance deployments and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use counselsync_common::services::CounselorStore;
use counselsync_config::AppConfig;
use counselsync_schedule::{ScheduleError, WorkingHours};

/// In-memory counselor store with a configurable default: counselors without
/// their own document fall back to the deployment-wide working hours.
pub struct InMemoryCounselorStore {
    default_hours: Option<WorkingHours>,
    overrides: Mutex<HashMap<String, WorkingHours>>,
}

impl InMemoryCounselorStore {
    pub fn new(default_hours: Option<WorkingHours>) -> Self {
        Self {
            default_hours,
            overrides: Mutex::new(HashMap::new()),
        }
    }

    /// Seed from the application config. Malformed working hours were
    /// already rejected at config load; this re-validates on the same path.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScheduleError> {
        let default_hours = config
            .working_hours
            .as_ref()
            .map(|section| section.to_model())
            .transpose()?;
        Ok(Self::new(default_hours))
    }
}

impl CounselorStore for InMemoryCounselorStore {
    fn working_hours(&self, counselor_id: &str) -> Option<WorkingHours> {
        self.overrides
            .lock()
            .unwrap()
            .get(counselor_id)
            .cloned()
            .or_else(|| self.default_hours.clone())
    }

    fn put(&self, counselor_id: &str, hours: WorkingHours) {
        self.overrides
            .lock()
            .unwrap()
            .insert(counselor_id.to_string(), hours);
    }
}
