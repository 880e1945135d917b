// --- File: crates/counselsync_schedule/src/working_hours.rs ---
//! A counselor's recurring weekly availability.
//!
//! Rules are local wall-clock intervals in the counselor's home time zone;
//! every query projects them onto concrete dates and converts to UTC before
//! any comparison, so DST transitions never shift a comparison.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::ScheduleError;
use crate::interval::TimeRange;

/// One recurring availability window: a weekday plus a local start/end time.
/// `start < end` is enforced at construction, so a rule never crosses local
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct WorkingHoursRule {
    weekday: Weekday,
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Deserialize)]
struct RawRule {
    weekday: String,
    start: NaiveTime,
    end: NaiveTime,
}

impl TryFrom<RawRule> for WorkingHoursRule {
    type Error = ScheduleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let weekday = Weekday::from_str(&raw.weekday)
            .map_err(|_| ScheduleError::UnknownWeekday(raw.weekday.clone()))?;
        WorkingHoursRule::new(weekday, raw.start, raw.end)
    }
}

impl WorkingHoursRule {
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidRule {
                weekday: weekday.to_string(),
                start,
                end,
            });
        }
        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

/// Ordered set of working-hours rules plus the counselor's home time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingHours {
    time_zone: Tz,
    rules: Vec<WorkingHoursRule>,
}

impl WorkingHours {
    /// Build a validated model. Rules are sorted by (weekday, start); rules
    /// on the same weekday must not overlap.
    pub fn new(time_zone: Tz, mut rules: Vec<WorkingHoursRule>) -> Result<Self, ScheduleError> {
        rules.sort_by_key(|r| (r.weekday.num_days_from_monday(), r.start));
        for pair in rules.windows(2) {
            if pair[0].weekday == pair[1].weekday && pair[1].start < pair[0].end {
                return Err(ScheduleError::OverlappingRules {
                    weekday: pair[0].weekday.to_string(),
                });
            }
        }
        Ok(Self { time_zone, rules })
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Rules for one weekday, ordered by start time. Pure lookup.
    pub fn rules_for(&self, weekday: Weekday) -> impl Iterator<Item = &WorkingHoursRule> {
        self.rules.iter().filter(move |r| r.weekday == weekday)
    }

    /// Project a rule onto a concrete local date, yielding a UTC range.
    ///
    /// Returns `None` when the rule's weekday does not match the date, or
    /// when a DST gap swallows the local start/end (the earliest valid
    /// mapping is used for ambiguous times).
    pub fn project(&self, rule: &WorkingHoursRule, date: NaiveDate) -> Option<TimeRange> {
        if date.weekday() != rule.weekday {
            return None;
        }
        let start = self
            .time_zone
            .from_local_datetime(&date.and_time(rule.start))
            .earliest()?;
        let end = self
            .time_zone
            .from_local_datetime(&date.and_time(rule.end))
            .earliest()?;
        TimeRange::new(start.with_timezone(&chrono::Utc), end.with_timezone(&chrono::Utc)).ok()
    }

    /// All rule projections intersecting `window`, clipped to it, in
    /// chronological order.
    pub fn blocks_within(&self, window: TimeRange) -> Vec<TimeRange> {
        let mut blocks = Vec::new();
        let first_day = window.start().with_timezone(&self.time_zone).date_naive();
        let last_day = window.end().with_timezone(&self.time_zone).date_naive();
        let mut day = first_day;
        while day <= last_day {
            for rule in self.rules_for(day.weekday()) {
                if let Some(projected) = self.project(rule, day) {
                    if let Some(clipped) = projected.intersect(&window) {
                        blocks.push(clipped);
                    }
                }
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        blocks.sort_by_key(|b| b.start());
        blocks
    }

    /// Whether `range` lies entirely within a single rule's projection for
    /// the local weekday of its start. A range crossing local midnight can
    /// never be covered, since rules do not cross midnight.
    pub fn covers(&self, range: &TimeRange) -> bool {
        let local_date = range.start().with_timezone(&self.time_zone).date_naive();
        self.rules_for(local_date.weekday())
            .filter_map(|rule| self.project(rule, local_date))
            .any(|projected| projected.contains(range))
    }
}
