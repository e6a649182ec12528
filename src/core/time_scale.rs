use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{datetime_to_millis, millis_to_datetime};
use crate::core::time_interval::tick_interval;
use crate::error::ChartResult;

/// Horizontal time axis: a linear scale over epoch milliseconds with
/// calendar-aware ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, range: (f64, f64)) -> ChartResult<Self> {
        let linear = LinearScale::new(
            (datetime_to_millis(start), datetime_to_millis(end)),
            range,
        )?;
        Ok(Self { start, end, linear })
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn map(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(datetime_to_millis(time))
    }

    /// Pixel back to time; `None` when the result leaves chrono's range.
    #[must_use]
    pub fn invert(self, pixel: f64) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.linear.invert(pixel))
    }

    /// Calendar-aligned ticks inside the domain, roughly `count` of them.
    ///
    /// A single-instant domain yields that instant as its only tick.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<DateTime<Utc>> {
        if count == 0 {
            return Vec::new();
        }
        let reverse = self.end < self.start;
        let (low, high) = if reverse {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        };
        if low == high {
            return vec![low];
        }

        let Some(interval) = tick_interval(low, high, count) else {
            return Vec::new();
        };
        let Some(stop) = high.checked_add_signed(TimeDelta::milliseconds(1)) else {
            return Vec::new();
        };
        let mut ticks = interval.range(low, stop);
        if reverse {
            ticks.reverse();
        }
        ticks
    }
}
