use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{LinearScale, Record, TimeScale};
use crate::error::{ChartError, ChartResult};

/// The three scales of a dual-axis chart, derived once from the record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub time: TimeScale,
    /// `value_bar` → y, drawn on the left axis.
    pub left: LinearScale,
    /// `value_area` → y, drawn on the right axis.
    pub right: LinearScale,
}

impl ChartScales {
    /// Builds all scales from the records' extents.
    ///
    /// `y_range` is `(bottom, top)` so larger values map to smaller pixels.
    /// Records with an invalid date still contribute to the value extents.
    pub fn from_records(
        records: &[Record],
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> ChartResult<Self> {
        if records.is_empty() {
            return Err(ChartError::EmptyDataset);
        }

        let mut dates = records.iter().filter_map(|record| record.date);
        let Some(first) = dates.next() else {
            return Err(ChartError::InvalidData(
                "no record carries a valid date".to_owned(),
            ));
        };
        let (min_date, max_date) =
            dates.fold((first, first), |(min, max), date| (min.min(date), max.max(date)));

        let max_bar = max_finite(records.iter().map(|record| record.value_bar));
        let max_area = max_finite(records.iter().map(|record| record.value_area));

        debug!(
            %min_date,
            %max_date,
            max_bar,
            max_area,
            "derived chart scale extents"
        );

        Ok(Self {
            time: TimeScale::new(min_date, max_date, x_range)?,
            left: LinearScale::new((0.0, max_bar), y_range)?,
            right: LinearScale::new((0.0, max_area), y_range)?,
        })
    }
}

/// Largest finite value; `0.0` when none is finite.
fn max_finite(values: impl Iterator<Item = f64>) -> f64 {
    values
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .max()
        .map_or(0.0, OrderedFloat::into_inner)
}
