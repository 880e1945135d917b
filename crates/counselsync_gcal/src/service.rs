// --- File: crates/counselsync_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait over
//! the Google Calendar v3 REST API. The meeting linkage convention follows
//! the rest of the system: a mirror event is stored under the meeting's id,
//! so `get_event(meeting_id)` finds the mirror of a meeting directly.

use chrono::{DateTime, SecondsFormat, Utc};
use counselsync_common::services::{
    BoxFuture, CalendarEvent, CalendarEventDraft, CalendarService,
};
use counselsync_common::HTTP_CLIENT;
use counselsync_config::GcalConfig;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GcalError;

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    config: GcalConfig,
    api_token: String,
    client: Client,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    ///
    /// The bearer token comes from the `GCAL_API_TOKEN` environment variable;
    /// token acquisition itself lives outside this crate.
    pub fn new(config: GcalConfig) -> Result<Self, GcalError> {
        let api_token = std::env::var("GCAL_API_TOKEN")
            .map_err(|_| GcalError::ConfigError("GCAL_API_TOKEN not set".to_string()))?;
        Ok(Self {
            config,
            api_token,
            client: HTTP_CLIENT.clone(),
        })
    }

    fn calendar_id(&self) -> &str {
        self.config.calendar_id.as_deref().unwrap_or("primary")
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url, path);
        self.client
            .request(method, url)
            .bearer_auth(&self.api_token)
    }
}

// --- Wire structs ---

#[derive(Serialize, Deserialize, Debug)]
struct EventDateTime {
    #[serde(rename = "dateTime")]
    date_time: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
struct EventResource {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    start: EventDateTime,
    end: EventDateTime,
    #[serde(default, rename = "extendedProperties")]
    extended_properties: Option<ExtendedProperties>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct ExtendedProperties {
    #[serde(default)]
    private: PrivateProperties,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct PrivateProperties {
    #[serde(default, rename = "meetingId")]
    meeting_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct EventListResponse {
    #[serde(default)]
    items: Vec<EventResource>,
}

#[derive(Serialize, Debug)]
struct EventPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: EventDateTime,
    end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none", rename = "extendedProperties")]
    extended_properties: Option<ExtendedProperties>,
}

impl EventPayload {
    fn from_draft(draft: &CalendarEventDraft, include_id: bool) -> Self {
        EventPayload {
            // Mirror events are keyed by the meeting id on insert
            id: if include_id {
                draft.meeting_id.clone()
            } else {
                None
            },
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            start: EventDateTime {
                date_time: draft.start_time,
            },
            end: EventDateTime {
                date_time: draft.end_time,
            },
            extended_properties: draft.meeting_id.as_ref().map(|meeting_id| {
                ExtendedProperties {
                    private: PrivateProperties {
                        meeting_id: Some(meeting_id.clone()),
                    },
                }
            }),
        }
    }
}

impl From<EventResource> for CalendarEvent {
    fn from(wire: EventResource) -> Self {
        CalendarEvent {
            id: wire.id,
            meeting_id: wire
                .extended_properties
                .and_then(|props| props.private.meeting_id),
            start_time: wire.start.date_time,
            end_time: wire.end.date_time,
            summary: wire.summary.unwrap_or_default(),
            description: wire.description,
        }
    }
}

#[derive(Serialize, Debug)]
struct FreeBusyRequest {
    #[serde(rename = "timeMin")]
    time_min: String,
    #[serde(rename = "timeMax")]
    time_max: String,
    items: Vec<FreeBusyItem>,
}

#[derive(Serialize, Debug)]
struct FreeBusyItem {
    id: String,
}

#[derive(Deserialize, Debug)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: std::collections::HashMap<String, FreeBusyCalendar>,
}

#[derive(Deserialize, Debug, Default)]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<FreeBusyPeriod>,
}

#[derive(Deserialize, Debug)]
struct FreeBusyPeriod {
    #[allow(dead_code)]
    start: DateTime<Utc>,
    #[allow(dead_code)]
    end: DateTime<Utc>,
}

fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GcalError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(GcalError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalError;

    fn list_events(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        max_results: usize,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        Box::pin(async move {
            let path = format!("/calendars/{}/events", self.calendar_id());
            let response = self
                .request(Method::GET, &path)
                .query(&[
                    ("timeMin", rfc3339(from)),
                    ("timeMax", rfc3339(to)),
                    ("maxResults", max_results.to_string()),
                    ("singleEvents", "true".to_string()),
                    ("orderBy", "startTime".to_string()),
                ])
                .send()
                .await?;
            let list: EventListResponse = check_status(response).await?.json().await?;
            let mut events: Vec<CalendarEvent> =
                list.items.into_iter().map(CalendarEvent::from).collect();
            events.sort_by_key(|event| event.start_time);
            Ok(events)
        })
    }

    fn free_busy(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async move {
            let calendar_id = self.calendar_id().to_string();
            let payload = FreeBusyRequest {
                time_min: rfc3339(from),
                time_max: rfc3339(to),
                items: vec![FreeBusyItem {
                    id: calendar_id.clone(),
                }],
            };
            let response = self
                .request(Method::POST, "/freeBusy")
                .json(&payload)
                .send()
                .await?;
            let freebusy: FreeBusyResponse = check_status(response).await?.json().await?;
            let busy_count = freebusy
                .calendars
                .get(&calendar_id)
                .map(|calendar| calendar.busy.len())
                .unwrap_or(0);
            debug!("freeBusy {} - {}: {} busy periods", from, to, busy_count);
            Ok(busy_count == 0)
        })
    }

    fn add_event(&self, event: CalendarEventDraft) -> BoxFuture<'_, CalendarEvent, Self::Error> {
        Box::pin(async move {
            let path = format!("/calendars/{}/events", self.calendar_id());
            let payload = EventPayload::from_draft(&event, true);
            let response = self
                .request(Method::POST, &path)
                .json(&payload)
                .send()
                .await?;
            let wire: EventResource = check_status(response).await?.json().await?;
            Ok(wire.into())
        })
    }

    fn update_event(
        &self,
        event_id: &str,
        event: CalendarEventDraft,
    ) -> BoxFuture<'_, (), Self::Error> {
        let path = format!("/calendars/{}/events/{event_id}", self.calendar_id());
        Box::pin(async move {
            let payload = EventPayload::from_draft(&event, false);
            let response = self
                .request(Method::PATCH, &path)
                .json(&payload)
                .send()
                .await?;
            check_status(response).await?;
            Ok(())
        })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let path = format!("/calendars/{}/events/{event_id}", self.calendar_id());
        Box::pin(async move {
            let response = self.request(Method::DELETE, &path).send().await?;
            check_status(response).await?;
            Ok(())
        })
    }

    fn get_event(&self, event_id: &str) -> BoxFuture<'_, Option<CalendarEvent>, Self::Error> {
        let path = format!("/calendars/{}/events/{event_id}", self.calendar_id());
        Box::pin(async move {
            let response = self.request(Method::GET, &path).send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let wire: EventResource = check_status(response).await?.json().await?;
            Ok(Some(wire.into()))
        })
    }
}

/// In-memory mock, usable by downstream crates' tests.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Mock calendar service for testing.
    #[derive(Default)]
    pub struct MockCalendarService {
        events: Mutex<HashMap<String, CalendarEvent>>,
    }

    impl MockCalendarService {
        /// Create a new mock calendar service.
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed an event directly, bypassing the service API.
        pub fn seed(&self, event: CalendarEvent) {
            self.events.lock().unwrap().insert(event.id.clone(), event);
        }

        pub fn event_count(&self) -> usize {
            self.events.lock().unwrap().len()
        }
    }

    impl CalendarService for MockCalendarService {
        type Error = GcalError;

        fn list_events(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
            max_results: usize,
        ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
            Box::pin(async move {
                let events = self.events.lock().unwrap();
                let mut matching: Vec<CalendarEvent> = events
                    .values()
                    .filter(|event| event.start_time < to && event.end_time > from)
                    .cloned()
                    .collect();
                matching.sort_by_key(|event| event.start_time);
                matching.truncate(max_results);
                Ok(matching)
            })
        }

        fn free_busy(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> BoxFuture<'_, bool, Self::Error> {
            Box::pin(async move {
                let events = self.events.lock().unwrap();
                Ok(!events
                    .values()
                    .any(|event| event.start_time < to && event.end_time > from))
            })
        }

        fn add_event(
            &self,
            event: CalendarEventDraft,
        ) -> BoxFuture<'_, CalendarEvent, Self::Error> {
            Box::pin(async move {
                let id = event
                    .meeting_id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let stored = CalendarEvent {
                    id: id.clone(),
                    meeting_id: event.meeting_id,
                    start_time: event.start_time,
                    end_time: event.end_time,
                    summary: event.summary,
                    description: event.description,
                };
                self.events.lock().unwrap().insert(id, stored.clone());
                Ok(stored)
            })
        }

        fn update_event(
            &self,
            event_id: &str,
            event: CalendarEventDraft,
        ) -> BoxFuture<'_, (), Self::Error> {
            let event_id = event_id.to_string();
            Box::pin(async move {
                let mut events = self.events.lock().unwrap();
                let existing = events.get_mut(&event_id).ok_or(GcalError::ApiError {
                    status_code: 404,
                    message: format!("event {event_id} not found"),
                })?;
                existing.start_time = event.start_time;
                existing.end_time = event.end_time;
                existing.summary = event.summary;
                existing.description = event.description;
                Ok(())
            })
        }

        fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
            let event_id = event_id.to_string();
            Box::pin(async move {
                self.events
                    .lock()
                    .unwrap()
                    .remove(&event_id)
                    .map(|_| ())
                    .ok_or(GcalError::ApiError {
                        status_code: 404,
                        message: format!("event {event_id} not found"),
                    })
            })
        }

        fn get_event(
            &self,
            event_id: &str,
        ) -> BoxFuture<'_, Option<CalendarEvent>, Self::Error> {
            let event_id = event_id.to_string();
            Box::pin(async move { Ok(self.events.lock().unwrap().get(&event_id).cloned()) })
        }
    }
}
