#[cfg(test)]
mod tests {
    use crate::error::ScheduleError;
    use crate::interval::{conflicts_with, merge, subtract_busy, BusyInterval, TimeRange};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, h, min, 0).unwrap()
    }

    fn range(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> TimeRange {
        TimeRange::new(at(start_h, start_m), at(end_h, end_m)).unwrap()
    }

    #[test]
    fn test_construction_rejects_inverted_range() {
        let result = TimeRange::new(at(10, 0), at(9, 0));
        assert!(matches!(result, Err(ScheduleError::InvalidRange { .. })));
    }

    #[test]
    fn test_construction_rejects_empty_range() {
        assert!(TimeRange::new(at(10, 0), at(10, 0)).is_err());
    }

    #[test]
    fn test_overlap_is_half_open() {
        // Touching endpoints do not overlap
        assert!(!range(9, 0, 10, 0).overlaps(&range(10, 0, 11, 0)));
        assert!(!range(10, 0, 11, 0).overlaps(&range(9, 0, 10, 0)));

        // A shared interior instant does
        assert!(range(9, 0, 10, 1).overlaps(&range(10, 0, 11, 0)));
        assert!(range(9, 0, 12, 0).overlaps(&range(10, 0, 10, 30)));

        // A range overlaps itself
        let r = range(9, 0, 10, 0);
        assert!(r.overlaps(&r));
    }

    #[test]
    fn test_contains() {
        let block = range(9, 0, 12, 0);
        assert!(block.contains(&range(9, 0, 12, 0)));
        assert!(block.contains(&range(10, 0, 10, 30)));
        assert!(!block.contains(&range(8, 59, 9, 30)));
        assert!(!block.contains(&range(11, 30, 12, 1)));
    }

    #[test]
    fn test_intersect() {
        assert_eq!(
            range(9, 0, 11, 0).intersect(&range(10, 0, 12, 0)),
            Some(range(10, 0, 11, 0))
        );
        // Touching ranges have an empty intersection
        assert_eq!(range(9, 0, 10, 0).intersect(&range(10, 0, 11, 0)), None);
    }

    #[test]
    fn test_merge_overlapping_and_adjacent() {
        let merged = merge(&[
            range(11, 0, 12, 0),
            range(9, 0, 10, 0),
            range(10, 0, 10, 30),
            range(9, 30, 9, 45),
        ]);
        assert_eq!(merged, vec![range(9, 0, 10, 30), range(11, 0, 12, 0)]);
    }

    #[test]
    fn test_subtract_splits_block() {
        // A busy interval strictly inside the block splits it in two
        let free = subtract_busy(range(9, 0, 12, 0), &[range(10, 0, 10, 30)]);
        assert_eq!(free, vec![range(9, 0, 10, 0), range(10, 30, 12, 0)]);
    }

    #[test]
    fn test_subtract_clips_at_block_edges() {
        let free = subtract_busy(range(9, 0, 12, 0), &[range(8, 0, 9, 30), range(11, 30, 13, 0)]);
        assert_eq!(free, vec![range(9, 30, 11, 30)]);
    }

    #[test]
    fn test_subtract_fully_busy_block() {
        let free = subtract_busy(range(9, 0, 12, 0), &[range(8, 0, 13, 0)]);
        assert!(free.is_empty());
    }

    #[test]
    fn test_subtract_ignores_disjoint_busy() {
        let block = range(9, 0, 12, 0);
        let free = subtract_busy(block, &[range(13, 0, 14, 0)]);
        assert_eq!(free, vec![block]);
    }

    #[test]
    fn test_conflicts_with_excludes_source() {
        let busy = vec![
            BusyInterval::new(range(10, 0, 10, 30), Some("meeting-1".to_string())),
            BusyInterval::new(range(14, 0, 15, 0), None),
        ];

        // The meeting's own interval does not block it
        assert!(!conflicts_with(
            &range(10, 0, 10, 30),
            &busy,
            Some("meeting-1")
        ));
        // Without exclusion it does
        assert!(conflicts_with(&range(10, 0, 10, 30), &busy, None));
        // Exclusion never hides unrelated intervals
        assert!(conflicts_with(&range(14, 30, 15, 30), &busy, Some("meeting-1")));
    }
}
