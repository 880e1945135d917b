#[cfg(test)]
mod tests {
    use crate::service::mock::MockCalendarService;
    use chrono::{Duration, TimeZone, Utc};
    use counselsync_common::services::{CalendarEventDraft, CalendarService};

    fn draft(meeting_id: Option<&str>, start_hour: u32) -> CalendarEventDraft {
        let start = Utc
            .with_ymd_and_hms(2025, 5, 5, start_hour, 0, 0)
            .unwrap();
        CalendarEventDraft {
            meeting_id: meeting_id.map(str::to_string),
            start_time: start,
            end_time: start + Duration::minutes(30),
            summary: "Counseling session".to_string(),
            description: Some("Password: secret".to_string()),
        }
    }

    #[tokio::test]
    async fn test_mirror_event_is_keyed_by_meeting_id() {
        let service = MockCalendarService::new();

        let created = service.add_event(draft(Some("555001"), 10)).await.unwrap();
        assert_eq!(created.id, "555001");
        assert_eq!(created.meeting_id.as_deref(), Some("555001"));

        // The mirror is addressable by the meeting id
        let fetched = service.get_event("555001").await.unwrap().unwrap();
        assert_eq!(fetched.summary, "Counseling session");
    }

    #[tokio::test]
    async fn test_list_events_filters_window_and_sorts() {
        let service = MockCalendarService::new();
        service.add_event(draft(None, 14)).await.unwrap();
        service.add_event(draft(None, 9)).await.unwrap();
        service.add_event(draft(None, 11)).await.unwrap();

        let from = Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap();
        let events = service.list_events(from, to, 100).await.unwrap();

        assert_eq!(events.len(), 2);
        assert!(events[0].start_time < events[1].start_time);
    }

    #[tokio::test]
    async fn test_list_events_honors_max_results() {
        let service = MockCalendarService::new();
        for hour in 9..15 {
            service.add_event(draft(None, hour)).await.unwrap();
        }

        let from = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 5, 6, 0, 0, 0).unwrap();
        let events = service.list_events(from, to, 3).await.unwrap();
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_free_busy_reflects_occupancy() {
        let service = MockCalendarService::new();
        service.add_event(draft(None, 10)).await.unwrap();

        let busy_from = Utc.with_ymd_and_hms(2025, 5, 5, 10, 15, 0).unwrap();
        let busy_to = Utc.with_ymd_and_hms(2025, 5, 5, 10, 45, 0).unwrap();
        assert!(!service.free_busy(busy_from, busy_to).await.unwrap());

        // Adjacent range is free: half-open semantics
        let free_from = Utc.with_ymd_and_hms(2025, 5, 5, 10, 30, 0).unwrap();
        let free_to = Utc.with_ymd_and_hms(2025, 5, 5, 11, 0, 0).unwrap();
        assert!(service.free_busy(free_from, free_to).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete_round_trip() {
        let service = MockCalendarService::new();
        let created = service.add_event(draft(Some("777"), 10)).await.unwrap();

        let mut updated = draft(Some("777"), 11);
        updated.summary = "Moved session".to_string();
        service.update_event(&created.id, updated).await.unwrap();

        let fetched = service.get_event(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.summary, "Moved session");
        assert_eq!(
            fetched.start_time,
            Utc.with_ymd_and_hms(2025, 5, 5, 11, 0, 0).unwrap()
        );

        service.delete_event(&created.id).await.unwrap();
        assert!(service.get_event(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_event_is_not_found() {
        let service = MockCalendarService::new();
        let result = service.delete_event("missing").await;
        assert!(result.is_err());
    }
}
