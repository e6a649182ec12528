use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const TOOLTIP_VISIBLE_OPACITY: f64 = 0.9;
pub const TOOLTIP_POINTER_OFFSET_PX: f64 = 10.0;
/// Height assumed until the host reports a measured one (three text lines).
pub const TOOLTIP_DEFAULT_HEIGHT_PX: f64 = 56.0;

pub const BAR_SHOW_DURATION: Duration = Duration::from_millis(200);
pub const BAR_HIDE_DURATION: Duration = Duration::from_millis(500);
pub const AREA_TRANSITION_DURATION: Duration = Duration::from_millis(250);

/// What the tooltip says about one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub id: String,
    pub value_area: f64,
    pub value_bar: f64,
}

impl TooltipContent {
    #[must_use]
    pub fn lines(&self) -> [String; 3] {
        [
            format!("ID: {}", self.id),
            format!("Value Area: {}", self.value_area),
            format!("Value Bar: {}", self.value_bar),
        ]
    }
}

/// Eased opacity change started by the latest show/hide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityTransition {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl OpacityTransition {
    #[must_use]
    pub fn settled(opacity: f64) -> Self {
        Self {
            from: opacity,
            to: opacity,
            duration: Duration::ZERO,
        }
    }

    /// Opacity `elapsed` after the transition started (cubic in-out easing).
    #[must_use]
    pub fn opacity_at(self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    #[must_use]
    pub fn is_complete(self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Top of the tooltip for a pointer at `pointer_y`, kept inside the plot band.
#[must_use]
pub fn clamp_tooltip_top(pointer_y: f64, tooltip_height: f64, plot_top: f64, plot_bottom: f64) -> f64 {
    pointer_y.max(plot_top + tooltip_height).min(plot_bottom)
}

/// The single floating tooltip of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    content: Option<TooltipContent>,
    left: f64,
    top: f64,
    height_px: f64,
    transition: OpacityTransition,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            content: None,
            left: 0.0,
            top: 0.0,
            height_px: TOOLTIP_DEFAULT_HEIGHT_PX,
            transition: OpacityTransition::settled(0.0),
        }
    }
}

impl Tooltip {
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Replaces content, moves next to the pointer and fades in.
    ///
    /// `plot_band` is `(top, bottom)` in pixels.
    pub fn show(
        &mut self,
        content: TooltipContent,
        pointer_x: f64,
        pointer_y: f64,
        plot_band: (f64, f64),
        duration: Duration,
    ) {
        self.content = Some(content);
        self.left = pointer_x + TOOLTIP_POINTER_OFFSET_PX;
        self.top = clamp_tooltip_top(pointer_y, self.height_px, plot_band.0, plot_band.1);
        self.fade_to(TOOLTIP_VISIBLE_OPACITY, duration);
    }

    /// Fades out; content and position are kept.
    pub fn hide(&mut self, duration: Duration) {
        self.fade_to(0.0, duration);
    }

    /// Uses the host's rendered height for future clamping.
    pub fn set_measured_height(&mut self, height_px: f64) {
        if height_px.is_finite() && height_px >= 0.0 {
            self.height_px = height_px;
        }
    }

    fn fade_to(&mut self, opacity: f64, duration: Duration) {
        self.transition = OpacityTransition {
            from: self.transition.to,
            to: opacity,
            duration,
        };
    }

    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    #[must_use]
    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    #[must_use]
    pub fn transition(&self) -> OpacityTransition {
        self.transition
    }

    /// Opacity once the running transition settles.
    #[must_use]
    pub fn target_opacity(&self) -> f64 {
        self.transition.to
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.content.is_some() && self.transition.to > 0.0
    }
}
