#[cfg(test)]
mod tests {
    use crate::interval::{BusyInterval, TimeRange};
    use crate::slots::slots_for_window;
    use crate::working_hours::{WorkingHours, WorkingHoursRule};
    use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc, Weekday};
    use chrono_tz::Tz;

    // Monday 2025-05-05, UTC working hours 09:00-12:00
    fn monday_hours() -> WorkingHours {
        WorkingHours::new(
            Tz::UTC,
            vec![WorkingHoursRule::new(
                Weekday::Mon,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            )
            .unwrap()],
        )
        .unwrap()
    }

    fn at(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, h, min, 0).unwrap()
    }

    fn range(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> TimeRange {
        TimeRange::new(at(start_h, start_m), at(end_h, end_m)).unwrap()
    }

    fn whole_day() -> TimeRange {
        TimeRange::new(at(0, 0), Utc.with_ymd_and_hms(2025, 5, 6, 0, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_busy_interval_splits_working_block() {
        // One 30-minute busy interval in the middle of Mon 09:00-12:00
        let busy = vec![BusyInterval::new(range(10, 0, 10, 30), None)];
        let slots = slots_for_window(
            &monday_hours(),
            whole_day(),
            Duration::minutes(30),
            &busy,
            None,
            100,
        );

        assert_eq!(
            slots,
            vec![
                range(9, 0, 9, 30),
                range(9, 30, 10, 0),
                range(10, 30, 11, 0),
                range(11, 0, 11, 30),
                range(11, 30, 12, 0),
            ]
        );
    }

    #[test]
    fn test_no_rules_yields_empty_not_error() {
        let hours = WorkingHours::new(Tz::UTC, vec![]).unwrap();
        let slots = slots_for_window(
            &hours,
            whole_day(),
            Duration::minutes(30),
            &[],
            None,
            100,
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn test_trailing_remainder_dropped() {
        // 50-minute slots in a 3-hour block: three fit, 30 minutes remain
        let slots = slots_for_window(
            &monday_hours(),
            whole_day(),
            Duration::minutes(50),
            &[],
            None,
            100,
        );
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[2].end(), at(11, 30));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let busy = vec![
            BusyInterval::new(range(9, 15, 9, 45), Some("evt-1".to_string())),
            BusyInterval::new(range(11, 0, 11, 30), None),
        ];
        let first = slots_for_window(
            &monday_hours(),
            whole_day(),
            Duration::minutes(30),
            &busy,
            None,
            100,
        );
        let second = slots_for_window(
            &monday_hours(),
            whole_day(),
            Duration::minutes(30),
            &busy,
            None,
            100,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_rescheduled_meeting_does_not_block_itself() {
        let busy = vec![BusyInterval::new(
            range(10, 0, 10, 30),
            Some("meeting-42".to_string()),
        )];
        let slots = slots_for_window(
            &monday_hours(),
            whole_day(),
            Duration::minutes(30),
            &busy,
            Some("meeting-42"),
            100,
        );

        // With its own interval excluded the block is unbroken: six slots
        assert_eq!(slots.len(), 6);
        assert!(slots.contains(&range(10, 0, 10, 30)));
    }

    #[test]
    fn test_max_results_truncates() {
        let slots = slots_for_window(
            &monday_hours(),
            whole_day(),
            Duration::minutes(30),
            &[],
            None,
            2,
        );
        assert_eq!(slots, vec![range(9, 0, 9, 30), range(9, 30, 10, 0)]);
    }

    #[test]
    fn test_slots_are_chronological_and_disjoint() {
        let busy = vec![BusyInterval::new(range(9, 40, 10, 10), None)];
        let slots = slots_for_window(
            &monday_hours(),
            whole_day(),
            Duration::minutes(20),
            &busy,
            None,
            100,
        );
        for pair in slots.windows(2) {
            assert!(pair[0].end() <= pair[1].start());
        }
    }

    #[test]
    fn test_window_clips_slots() {
        // Window starting mid-morning drops the earlier slots
        let window = TimeRange::new(at(10, 45), at(23, 0)).unwrap();
        let slots = slots_for_window(
            &monday_hours(),
            window,
            Duration::minutes(30),
            &[],
            None,
            100,
        );
        assert_eq!(
            slots,
            vec![range(10, 45, 11, 15), range(11, 15, 11, 45)]
        );
    }
}
