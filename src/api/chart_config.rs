use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Fixed layout of the dual-axis chart.
///
/// `x_start..x_end` is the horizontal plot span; `y_start` is the plot
/// bottom (value zero) and `y_end` the plot top. Views always use
/// `ChartLayout::default()`; the type is public and serializable so tests
/// and tools can build scenes directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub container_width: u32,
    pub container_height: u32,
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
    pub ticks: usize,
    pub tick_size: f64,
    pub bar_width: f64,
    pub dim_opacity: f64,
    pub full_opacity: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            container_width: 800,
            container_height: 400,
            x_start: 60.0,
            x_end: 730.0,
            y_start: 350.0,
            y_end: 50.0,
            ticks: 5,
            tick_size: 10.0,
            bar_width: 10.0,
            dim_opacity: 0.1,
            full_opacity: 1.0,
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.container_width, self.container_height)
    }

    /// Horizontal pixel range of the time scale.
    #[must_use]
    pub fn x_range(self) -> (f64, f64) {
        (self.x_start, self.x_end)
    }

    /// Vertical pixel range of both value scales (bottom first).
    #[must_use]
    pub fn y_range(self) -> (f64, f64) {
        (self.y_start, self.y_end)
    }

    /// `(top, bottom)` of the plotting band used to clamp the tooltip.
    #[must_use]
    pub fn plot_band(self) -> (f64, f64) {
        (self.y_end, self.y_start)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport().is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.container_width,
                height: self.container_height,
            });
        }

        for (name, value) in [
            ("x_start", self.x_start),
            ("x_end", self.x_end),
            ("y_start", self.y_start),
            ("y_end", self.y_end),
            ("tick_size", self.tick_size),
            ("bar_width", self.bar_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }

        if self.x_start >= self.x_end || self.x_end > f64::from(self.container_width) {
            return Err(ChartError::InvalidData(
                "layout x span must satisfy x_start < x_end <= container_width".to_owned(),
            ));
        }
        if self.y_end >= self.y_start || self.y_start > f64::from(self.container_height) {
            return Err(ChartError::InvalidData(
                "layout y span must satisfy y_end < y_start <= container_height".to_owned(),
            ));
        }
        if self.ticks == 0 {
            return Err(ChartError::InvalidData(
                "layout tick count must be > 0".to_owned(),
            ));
        }

        for (name, value) in [
            ("dim_opacity", self.dim_opacity),
            ("full_opacity", self.full_opacity),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be in [0, 1]"
                )));
            }
        }
        if self.dim_opacity >= self.full_opacity {
            return Err(ChartError::InvalidData(
                "layout dim opacity must be below full opacity".to_owned(),
            ));
        }

        Ok(self)
    }
}
