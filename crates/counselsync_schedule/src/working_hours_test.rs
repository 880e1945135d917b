#[cfg(test)]
mod tests {
    use crate::error::ScheduleError;
    use crate::interval::TimeRange;
    use crate::working_hours::{WorkingHours, WorkingHoursRule};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
    use chrono_tz::Tz;

    fn t(h: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, min, 0).unwrap()
    }

    fn rule(weekday: Weekday, start: (u32, u32), end: (u32, u32)) -> WorkingHoursRule {
        WorkingHoursRule::new(weekday, t(start.0, start.1), t(end.0, end.1)).unwrap()
    }

    #[test]
    fn test_rule_rejects_start_not_before_end() {
        let result = WorkingHoursRule::new(Weekday::Mon, t(12, 0), t(9, 0));
        assert!(matches!(result, Err(ScheduleError::InvalidRule { .. })));
        assert!(WorkingHoursRule::new(Weekday::Mon, t(9, 0), t(9, 0)).is_err());
    }

    #[test]
    fn test_overlapping_rules_on_same_weekday_rejected() {
        let result = WorkingHours::new(
            Tz::UTC,
            vec![
                rule(Weekday::Mon, (9, 0), (12, 0)),
                rule(Weekday::Mon, (11, 0), (14, 0)),
            ],
        );
        assert!(matches!(
            result,
            Err(ScheduleError::OverlappingRules { .. })
        ));
    }

    #[test]
    fn test_adjacent_rules_on_same_weekday_allowed() {
        let hours = WorkingHours::new(
            Tz::UTC,
            vec![
                rule(Weekday::Mon, (9, 0), (12, 0)),
                rule(Weekday::Mon, (12, 0), (14, 0)),
            ],
        );
        assert!(hours.is_ok());
    }

    #[test]
    fn test_rules_for_is_ordered_by_start() {
        let hours = WorkingHours::new(
            Tz::UTC,
            vec![
                rule(Weekday::Tue, (8, 0), (9, 0)),
                rule(Weekday::Mon, (14, 0), (16, 0)),
                rule(Weekday::Mon, (9, 0), (12, 0)),
            ],
        )
        .unwrap();

        let monday: Vec<_> = hours.rules_for(Weekday::Mon).collect();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].start(), t(9, 0));
        assert_eq!(monday[1].start(), t(14, 0));

        assert_eq!(hours.rules_for(Weekday::Sun).count(), 0);
    }

    #[test]
    fn test_projection_converts_local_to_utc() {
        // Zurich is UTC+2 in May
        let hours = WorkingHours::new(
            Tz::Europe__Zurich,
            vec![rule(Weekday::Mon, (9, 0), (12, 0))],
        )
        .unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

        let rule_ref = hours.rules_for(Weekday::Mon).next().unwrap();
        let projected = hours.project(rule_ref, monday).unwrap();
        assert_eq!(
            projected.start(),
            Utc.with_ymd_and_hms(2025, 5, 5, 7, 0, 0).unwrap()
        );
        assert_eq!(
            projected.end(),
            Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_projection_skips_dst_gap() {
        // 2025-03-30: Zurich skips 02:00-03:00 local
        let hours = WorkingHours::new(
            Tz::Europe__Zurich,
            vec![rule(Weekday::Sun, (2, 0), (2, 45))],
        )
        .unwrap();
        let spring_forward = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();

        let rule_ref = hours.rules_for(Weekday::Sun).next().unwrap();
        assert!(hours.project(rule_ref, spring_forward).is_none());
    }

    #[test]
    fn test_projection_ignores_other_weekdays() {
        let hours = WorkingHours::new(Tz::UTC, vec![rule(Weekday::Mon, (9, 0), (12, 0))]).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        let rule_ref = hours.rules_for(Weekday::Mon).next().unwrap();
        assert!(hours.project(rule_ref, tuesday).is_none());
    }

    #[test]
    fn test_blocks_within_clips_to_window() {
        let hours = WorkingHours::new(Tz::UTC, vec![rule(Weekday::Mon, (9, 0), (12, 0))]).unwrap();
        let window = TimeRange::new(
            Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 5, 23, 59, 59).unwrap(),
        )
        .unwrap();

        let blocks = hours.blocks_within(window);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].start(),
            Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap()
        );
        assert_eq!(
            blocks[0].end(),
            Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_covers_requires_full_containment() {
        let hours = WorkingHours::new(Tz::UTC, vec![rule(Weekday::Mon, (9, 0), (12, 0))]).unwrap();

        let inside = TimeRange::new(
            Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 5, 9, 30, 0).unwrap(),
        )
        .unwrap();
        assert!(hours.covers(&inside));

        let spills_over = TimeRange::new(
            Utc.with_ymd_and_hms(2025, 5, 5, 11, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 5, 12, 30, 0).unwrap(),
        )
        .unwrap();
        assert!(!hours.covers(&spills_over));

        let wrong_day = TimeRange::new(
            Utc.with_ymd_and_hms(2025, 5, 6, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 6, 9, 30, 0).unwrap(),
        )
        .unwrap();
        assert!(!hours.covers(&wrong_day));
    }
}
