use chrono::{DateTime, Datelike, Months, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_millis;
use crate::core::scale::tick_step;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = SECOND_MS * 60;
const HOUR_MS: i64 = MINUTE_MS * 60;
const DAY_MS: i64 = HOUR_MS * 24;
const WEEK_MS: i64 = DAY_MS * 7;
const MONTH_MS: i64 = DAY_MS * 30;
const YEAR_MS: i64 = DAY_MS * 365;

/// Upper bound on ticks produced by one `range` call.
const MAX_RANGE_TICKS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Calendar interval used to place time-axis ticks, aligned in UTC.
///
/// `step > 1` keeps only boundaries whose calendar field is a multiple of
/// `step` (e.g. `Hour` × 6 yields 00, 06, 12, 18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: i64,
}

const TICK_INTERVALS: [(TimeUnit, i64, i64); 18] = [
    (TimeUnit::Second, 1, SECOND_MS),
    (TimeUnit::Second, 5, 5 * SECOND_MS),
    (TimeUnit::Second, 15, 15 * SECOND_MS),
    (TimeUnit::Second, 30, 30 * SECOND_MS),
    (TimeUnit::Minute, 1, MINUTE_MS),
    (TimeUnit::Minute, 5, 5 * MINUTE_MS),
    (TimeUnit::Minute, 15, 15 * MINUTE_MS),
    (TimeUnit::Minute, 30, 30 * MINUTE_MS),
    (TimeUnit::Hour, 1, HOUR_MS),
    (TimeUnit::Hour, 3, 3 * HOUR_MS),
    (TimeUnit::Hour, 6, 6 * HOUR_MS),
    (TimeUnit::Hour, 12, 12 * HOUR_MS),
    (TimeUnit::Day, 1, DAY_MS),
    (TimeUnit::Day, 2, 2 * DAY_MS),
    (TimeUnit::Week, 1, WEEK_MS),
    (TimeUnit::Month, 1, MONTH_MS),
    (TimeUnit::Month, 3, 3 * MONTH_MS),
    (TimeUnit::Year, 1, YEAR_MS),
];

/// Picks the interval whose duration is closest (by ratio) to `span / count`.
#[must_use]
pub fn tick_interval(
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
    count: usize,
) -> Option<TimeInterval> {
    let (start_ms, stop_ms) = (datetime_to_millis(start), datetime_to_millis(stop));
    let count = count as f64;
    let target = (stop_ms - start_ms).abs() / count;
    let index = TICK_INTERVALS.partition_point(|&(_, _, duration)| duration as f64 <= target);

    if index == TICK_INTERVALS.len() {
        let years = tick_step(
            start_ms / YEAR_MS as f64,
            stop_ms / YEAR_MS as f64,
            count,
        )?;
        let step = years.floor() as i64;
        return (step > 0).then_some(TimeInterval {
            unit: TimeUnit::Year,
            step,
        });
    }

    if index == 0 {
        let step = tick_step(start_ms, stop_ms, count)?.max(1.0).floor() as i64;
        return Some(TimeInterval {
            unit: TimeUnit::Millisecond,
            step,
        });
    }

    let (lower_unit, lower_step, lower_ms) = TICK_INTERVALS[index - 1];
    let (upper_unit, upper_step, upper_ms) = TICK_INTERVALS[index];
    let (unit, step) = if target / (lower_ms as f64) < (upper_ms as f64) / target {
        (lower_unit, lower_step)
    } else {
        (upper_unit, upper_step)
    };
    Some(TimeInterval { unit, step })
}

impl TimeInterval {
    #[must_use]
    pub const fn new(unit: TimeUnit, step: i64) -> Self {
        Self { unit, step }
    }

    /// Latest interval boundary at or before `time`.
    #[must_use]
    pub fn floor(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.unit {
            TimeUnit::Millisecond => {
                let step = self.step.max(1);
                DateTime::from_timestamp_millis(time.timestamp_millis().div_euclid(step) * step)
            }
            TimeUnit::Year => {
                let step = self.step.max(1) as i32;
                Utc.with_ymd_and_hms(time.year().div_euclid(step) * step, 1, 1, 0, 0, 0)
                    .single()
            }
            unit => {
                let mut floored = floor_unit(time, unit)?;
                while !self.matches(floored) {
                    let before = floored.checked_sub_signed(TimeDelta::milliseconds(1))?;
                    floored = floor_unit(before, unit)?;
                }
                Some(floored)
            }
        }
    }

    /// Earliest interval boundary at or after `time`.
    #[must_use]
    pub fn ceil(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let floored = self.floor(time.checked_sub_signed(TimeDelta::milliseconds(1))?)?;
        self.floor(self.offset_one(floored)?)
    }

    /// Every boundary in `[start, stop)`.
    #[must_use]
    pub fn range(self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut out = Vec::new();
        let Some(mut current) = self.ceil(start) else {
            return out;
        };

        while current < stop && out.len() < MAX_RANGE_TICKS {
            out.push(current);
            let Some(next) = self.offset_one(current).and_then(|next| self.floor(next)) else {
                break;
            };
            if next <= current {
                break;
            }
            current = next;
        }
        out
    }

    fn offset_one(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.unit {
            TimeUnit::Millisecond => {
                time.checked_add_signed(TimeDelta::milliseconds(self.step.max(1)))
            }
            TimeUnit::Year => {
                let months = u32::try_from(self.step.max(1).checked_mul(12)?).ok()?;
                time.checked_add_months(Months::new(months))
            }
            unit => {
                let mut next = offset_unit(time, unit)?;
                while !self.matches(next) {
                    next = offset_unit(next, unit)?;
                }
                Some(next)
            }
        }
    }

    fn matches(self, time: DateTime<Utc>) -> bool {
        if self.step <= 1 {
            return true;
        }
        let field = match self.unit {
            TimeUnit::Second => time.second(),
            TimeUnit::Minute => time.minute(),
            TimeUnit::Hour => time.hour(),
            TimeUnit::Day => time.day0(),
            TimeUnit::Month => time.month0(),
            TimeUnit::Millisecond | TimeUnit::Week | TimeUnit::Year => return true,
        };
        i64::from(field) % self.step == 0
    }
}

fn floor_unit(time: DateTime<Utc>, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let millis = time.timestamp_millis();
    let truncate = |width: i64| DateTime::from_timestamp_millis(millis.div_euclid(width) * width);
    match unit {
        TimeUnit::Millisecond => Some(time),
        TimeUnit::Second => truncate(SECOND_MS),
        TimeUnit::Minute => truncate(MINUTE_MS),
        TimeUnit::Hour => truncate(HOUR_MS),
        TimeUnit::Day => truncate(DAY_MS),
        TimeUnit::Week => {
            let day = truncate(DAY_MS)?;
            let back = i64::from(day.weekday().num_days_from_sunday());
            day.checked_sub_signed(TimeDelta::days(back))
        }
        TimeUnit::Month => Utc
            .with_ymd_and_hms(time.year(), time.month(), 1, 0, 0, 0)
            .single(),
        TimeUnit::Year => Utc.with_ymd_and_hms(time.year(), 1, 1, 0, 0, 0).single(),
    }
}

fn offset_unit(time: DateTime<Utc>, unit: TimeUnit) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Millisecond => time.checked_add_signed(TimeDelta::milliseconds(1)),
        TimeUnit::Second => time.checked_add_signed(TimeDelta::milliseconds(SECOND_MS)),
        TimeUnit::Minute => time.checked_add_signed(TimeDelta::milliseconds(MINUTE_MS)),
        TimeUnit::Hour => time.checked_add_signed(TimeDelta::milliseconds(HOUR_MS)),
        TimeUnit::Day => time.checked_add_signed(TimeDelta::days(1)),
        TimeUnit::Week => time.checked_add_signed(TimeDelta::days(7)),
        TimeUnit::Month => time.checked_add_months(Months::new(1)),
        TimeUnit::Year => time.checked_add_months(Months::new(12)),
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeInterval, TimeUnit, tick_interval};
    use chrono::{TimeZone, Utc};

    #[test]
    fn one_day_span_prefers_six_hours() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let stop = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(
            tick_interval(start, stop, 5),
            Some(TimeInterval::new(TimeUnit::Hour, 6))
        );
    }

    #[test]
    fn stepped_floor_walks_back_to_matching_field() {
        let interval = TimeInterval::new(TimeUnit::Hour, 6);
        let time = Utc.with_ymd_and_hms(2024, 3, 5, 11, 59, 59).unwrap();
        assert_eq!(
            interval.floor(time),
            Utc.with_ymd_and_hms(2024, 3, 5, 6, 0, 0).single()
        );
    }

    #[test]
    fn week_floor_lands_on_sunday() {
        let interval = TimeInterval::new(TimeUnit::Week, 1);
        // 2024-01-03 is a Wednesday.
        let time = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();
        assert_eq!(
            interval.floor(time),
            Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).single()
        );
    }

    #[test]
    fn ceil_keeps_exact_boundaries() {
        let interval = TimeInterval::new(TimeUnit::Minute, 15);
        let boundary = Utc.with_ymd_and_hms(2024, 1, 1, 10, 45, 0).unwrap();
        assert_eq!(interval.ceil(boundary), Some(boundary));
    }
}
