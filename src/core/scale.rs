use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a value domain to a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how the
/// vertical value axes put larger values higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        for (name, value) in [
            ("domain start", domain.0),
            ("domain end", domain.1),
            ("range start", range.0),
            ("range end", range.1),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "scale {name} must be finite"
                )));
            }
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to the range.
    ///
    /// A zero-width domain maps everything to the middle of the range.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round-number ticks covering the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count as f64)
    }
}

/// Returns `(i1, i2, inc)`; a negative `inc` encodes the reciprocal step so
/// fractional ticks are computed by division without accumulating error.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let reciprocal = 10f64.powf(-power) / factor;
        i1 = (start * reciprocal).round();
        i2 = (stop * reciprocal).round();
        if i1 / reciprocal < start {
            i1 += 1.0;
        }
        if i2 / reciprocal > stop {
            i2 -= 1.0;
        }
        inc = -reciprocal;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

pub(crate) fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count.is_nan() || count <= 0.0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(low, high, count);
    if i2 < i1 || !inc.is_finite() {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Tick step for the given span and count; `None` when no step exists.
pub(crate) fn tick_step(start: f64, stop: f64, count: f64) -> Option<f64> {
    if count.is_nan() || count <= 0.0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return None;
    }
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(low, high, count);
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    step.is_finite().then_some(step)
}

#[cfg(test)]
mod tests {
    use super::{tick_step, ticks};

    #[test]
    fn integer_ticks_use_nice_steps() {
        assert_eq!(ticks(0.0, 10.0, 5.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(0.0, 95.0, 5.0), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn fractional_ticks_avoid_float_drift() {
        assert_eq!(ticks(0.0, 1.0, 5.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn reversed_domain_returns_descending_ticks() {
        assert_eq!(ticks(10.0, 0.0, 5.0), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn tick_step_reports_increment() {
        assert_eq!(tick_step(0.0, 10.0, 5.0), Some(2.0));
        assert_eq!(tick_step(0.0, 1.0, 5.0), Some(0.2));
        assert_eq!(tick_step(3.0, 3.0, 5.0), None);
    }
}
