// --- File: crates/counselsync_zoom/src/service.rs ---
//! Zoom meeting service implementation.
//!
//! This module provides an implementation of the MeetingService trait over
//! the Zoom REST API. Wire structs stay private to this file; everything the
//! engine sees is the common `Meeting` shape with the provider's secrets
//! (password, join/start URLs) passed through opaquely.

use chrono::{DateTime, SecondsFormat, Utc};
use counselsync_common::services::{
    BoxFuture, Meeting, MeetingPatch, MeetingSpec, MeetingService, Registrant, RegistrantRequest,
};
use counselsync_common::HTTP_CLIENT;
use counselsync_config::ZoomConfig;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ZoomError;

/// Scheduled meeting type in the Zoom API.
const MEETING_TYPE_SCHEDULED: u8 = 2;

/// Zoom meeting service implementation.
pub struct ZoomMeetingService {
    config: ZoomConfig,
    client: Client,
}

impl ZoomMeetingService {
    /// Create a new Zoom meeting service using the shared HTTP client.
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            client: HTTP_CLIENT.clone(),
        }
    }

    fn request(&self, method: Method, token: &str, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url, path);
        self.client.request(method, url).bearer_auth(token)
    }
}

// --- Wire structs ---

#[derive(Serialize, Debug)]
struct CreateMeetingPayload {
    topic: String,
    #[serde(rename = "type")]
    meeting_type: u8,
    start_time: String,
    duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    agenda: Option<String>,
}

#[derive(Serialize, Debug, Default)]
struct PatchMeetingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct MeetingResponse {
    id: i64,
    topic: String,
    start_time: DateTime<Utc>,
    duration: i64,
    password: Option<String>,
    join_url: Option<String>,
    start_url: Option<String>,
}

impl From<MeetingResponse> for Meeting {
    fn from(wire: MeetingResponse) -> Self {
        Meeting {
            id: wire.id.to_string(),
            topic: wire.topic,
            start_time: wire.start_time,
            duration_minutes: wire.duration,
            password: wire.password,
            join_url: wire.join_url,
            start_url: wire.start_url,
        }
    }
}

#[derive(Serialize, Debug)]
struct RegistrantPayload {
    email: String,
    first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RegistrantResponse {
    registrant_id: String,
    join_url: Option<String>,
}

fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Map a non-success response to `ApiError` carrying the upstream status.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ZoomError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ZoomError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}

impl MeetingService for ZoomMeetingService {
    type Error = ZoomError;

    fn create_meeting(
        &self,
        token: &str,
        spec: MeetingSpec,
    ) -> BoxFuture<'_, Meeting, Self::Error> {
        let token = token.to_string();
        Box::pin(async move {
            let payload = CreateMeetingPayload {
                topic: spec.topic,
                meeting_type: MEETING_TYPE_SCHEDULED,
                start_time: rfc3339(spec.start_time),
                duration: spec.duration_minutes,
                agenda: spec.agenda,
            };
            debug!("creating meeting: {:?}", payload.topic);
            let path = format!("/users/{}/meetings", self.config.user_id);
            let response = self
                .request(Method::POST, &token, &path)
                .json(&payload)
                .send()
                .await?;
            let wire: MeetingResponse = check_status(response).await?.json().await?;
            Ok(wire.into())
        })
    }

    fn get_meeting(&self, token: &str, meeting_id: &str) -> BoxFuture<'_, Meeting, Self::Error> {
        let token = token.to_string();
        let path = format!("/meetings/{meeting_id}");
        Box::pin(async move {
            let response = self.request(Method::GET, &token, &path).send().await?;
            let wire: MeetingResponse = check_status(response).await?.json().await?;
            Ok(wire.into())
        })
    }

    fn edit_meeting(
        &self,
        token: &str,
        meeting_id: &str,
        patch: MeetingPatch,
    ) -> BoxFuture<'_, (), Self::Error> {
        let token = token.to_string();
        let path = format!("/meetings/{meeting_id}");
        Box::pin(async move {
            let payload = PatchMeetingPayload {
                topic: patch.topic,
                start_time: patch.start_time.map(rfc3339),
                duration: patch.duration_minutes,
            };
            let response = self
                .request(Method::PATCH, &token, &path)
                .json(&payload)
                .send()
                .await?;
            check_status(response).await?;
            Ok(())
        })
    }

    fn delete_meeting(&self, token: &str, meeting_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let token = token.to_string();
        let path = format!("/meetings/{meeting_id}");
        Box::pin(async move {
            let response = self.request(Method::DELETE, &token, &path).send().await?;
            check_status(response).await?;
            Ok(())
        })
    }

    fn add_registrant(
        &self,
        token: &str,
        meeting_id: &str,
        registrant: RegistrantRequest,
    ) -> BoxFuture<'_, Registrant, Self::Error> {
        let token = token.to_string();
        let path = format!("/meetings/{meeting_id}/registrants");
        Box::pin(async move {
            let payload = RegistrantPayload {
                email: registrant.email,
                first_name: registrant.first_name,
                last_name: registrant.last_name,
            };
            let response = self
                .request(Method::POST, &token, &path)
                .json(&payload)
                .send()
                .await?;
            let wire: RegistrantResponse = check_status(response).await?.json().await?;
            Ok(Registrant {
                id: wire.registrant_id,
                join_url: wire.join_url,
            })
        })
    }
}

/// In-memory mock, usable by downstream crates' tests.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock meeting service for testing.
    pub struct MockMeetingService {
        meetings: Mutex<HashMap<String, Meeting>>,
        next_id: Mutex<u64>,
    }

    impl MockMeetingService {
        pub fn new() -> Self {
            Self {
                meetings: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1000),
            }
        }

        pub fn meeting_count(&self) -> usize {
            self.meetings.lock().unwrap().len()
        }
    }

    impl Default for MockMeetingService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MeetingService for MockMeetingService {
        type Error = ZoomError;

        fn create_meeting(
            &self,
            _token: &str,
            spec: MeetingSpec,
        ) -> BoxFuture<'_, Meeting, Self::Error> {
            Box::pin(async move {
                let mut next_id = self.next_id.lock().unwrap();
                let id = next_id.to_string();
                *next_id += 1;
                let meeting = Meeting {
                    id: id.clone(),
                    topic: spec.topic,
                    start_time: spec.start_time,
                    duration_minutes: spec.duration_minutes,
                    password: Some("mock-password".to_string()),
                    join_url: Some(format!("https://meet.invalid/j/{id}")),
                    start_url: Some(format!("https://meet.invalid/s/{id}")),
                };
                self.meetings
                    .lock()
                    .unwrap()
                    .insert(id, meeting.clone());
                Ok(meeting)
            })
        }

        fn get_meeting(
            &self,
            _token: &str,
            meeting_id: &str,
        ) -> BoxFuture<'_, Meeting, Self::Error> {
            let meeting_id = meeting_id.to_string();
            Box::pin(async move {
                self.meetings
                    .lock()
                    .unwrap()
                    .get(&meeting_id)
                    .cloned()
                    .ok_or(ZoomError::ApiError {
                        status_code: 404,
                        message: format!("meeting {meeting_id} not found"),
                    })
            })
        }

        fn edit_meeting(
            &self,
            _token: &str,
            meeting_id: &str,
            patch: MeetingPatch,
        ) -> BoxFuture<'_, (), Self::Error> {
            let meeting_id = meeting_id.to_string();
            Box::pin(async move {
                let mut meetings = self.meetings.lock().unwrap();
                let meeting = meetings.get_mut(&meeting_id).ok_or(ZoomError::ApiError {
                    status_code: 404,
                    message: format!("meeting {meeting_id} not found"),
                })?;
                if let Some(topic) = patch.topic {
                    meeting.topic = topic;
                }
                if let Some(start_time) = patch.start_time {
                    meeting.start_time = start_time;
                }
                if let Some(duration) = patch.duration_minutes {
                    meeting.duration_minutes = duration;
                }
                Ok(())
            })
        }

        fn delete_meeting(
            &self,
            _token: &str,
            meeting_id: &str,
        ) -> BoxFuture<'_, (), Self::Error> {
            let meeting_id = meeting_id.to_string();
            Box::pin(async move {
                self.meetings
                    .lock()
                    .unwrap()
                    .remove(&meeting_id)
                    .map(|_| ())
                    .ok_or(ZoomError::ApiError {
                        status_code: 404,
                        message: format!("meeting {meeting_id} not found"),
                    })
            })
        }

        fn add_registrant(
            &self,
            _token: &str,
            meeting_id: &str,
            registrant: RegistrantRequest,
        ) -> BoxFuture<'_, Registrant, Self::Error> {
            let meeting_id = meeting_id.to_string();
            Box::pin(async move {
                if !self.meetings.lock().unwrap().contains_key(&meeting_id) {
                    return Err(ZoomError::ApiError {
                        status_code: 404,
                        message: format!("meeting {meeting_id} not found"),
                    });
                }
                Ok(Registrant {
                    id: format!("reg-{}", registrant.email),
                    join_url: Some(format!("https://meet.invalid/j/{meeting_id}")),
                })
            })
        }
    }
}
