use chrono::{Duration, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use counselsync_schedule::interval::{BusyInterval, TimeRange};
use counselsync_schedule::slots::slots_for_window;
use counselsync_schedule::working_hours::{WorkingHours, WorkingHoursRule};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn weekday_hours() -> WorkingHours {
    let rules = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
    .iter()
    .map(|&weekday| {
        WorkingHoursRule::new(
            weekday,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )
        .unwrap()
    })
    .collect();
    WorkingHours::new(Tz::UTC, rules).unwrap()
}

fn week_window() -> TimeRange {
    TimeRange::new(
        Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

fn busy_intervals(count: usize) -> Vec<BusyInterval> {
    let base = Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = base + Duration::hours(2 * i as i64);
            BusyInterval::new(
                TimeRange::new(start, start + Duration::minutes(45)).unwrap(),
                None,
            )
        })
        .collect()
}

fn benchmark_resolve_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("slots_for_window");
    let hours = weekday_hours();

    group.bench_function("no_busy_intervals", |b| {
        b.iter(|| {
            slots_for_window(
                black_box(&hours),
                black_box(week_window()),
                black_box(Duration::minutes(30)),
                black_box(&[]),
                None,
                1000,
            )
        })
    });

    group.bench_function("twenty_busy_intervals", |b| {
        let busy = busy_intervals(20);
        b.iter(|| {
            slots_for_window(
                black_box(&hours),
                black_box(week_window()),
                black_box(Duration::minutes(30)),
                black_box(&busy),
                None,
                1000,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolve_slots);
criterion_main!(benches);
