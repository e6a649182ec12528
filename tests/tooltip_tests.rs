use std::time::Duration;

use approx::assert_relative_eq;
use dual_axis_chart::interaction::tooltip::{
    AREA_TRANSITION_DURATION, BAR_HIDE_DURATION, BAR_SHOW_DURATION, TOOLTIP_DEFAULT_HEIGHT_PX,
    TOOLTIP_VISIBLE_OPACITY, clamp_tooltip_top,
};
use dual_axis_chart::interaction::{OpacityTransition, Tooltip, TooltipContent};

const PLOT_BAND: (f64, f64) = (50.0, 350.0);

fn content() -> TooltipContent {
    TooltipContent {
        id: "a".to_owned(),
        value_area: 10.0,
        value_bar: 5.5,
    }
}

#[test]
fn tooltip_starts_hidden() {
    let tooltip = Tooltip::hidden();
    assert!(!tooltip.is_visible());
    assert!(tooltip.content().is_none());
    assert_eq!(tooltip.target_opacity(), 0.0);
    assert_eq!(tooltip.height_px(), TOOLTIP_DEFAULT_HEIGHT_PX);
}

#[test]
fn content_lines_match_display_format() {
    assert_eq!(
        content().lines(),
        [
            "ID: a".to_owned(),
            "Value Area: 10".to_owned(),
            "Value Bar: 5.5".to_owned(),
        ]
    );
}

#[test]
fn show_positions_next_to_pointer_and_fades_in() {
    let mut tooltip = Tooltip::hidden();
    tooltip.show(content(), 200.0, 240.0, PLOT_BAND, BAR_SHOW_DURATION);

    assert!(tooltip.is_visible());
    assert_eq!(tooltip.content(), Some(&content()));
    assert_eq!(tooltip.position(), (210.0, 240.0));
    assert_eq!(
        tooltip.transition(),
        OpacityTransition {
            from: 0.0,
            to: TOOLTIP_VISIBLE_OPACITY,
            duration: BAR_SHOW_DURATION,
        }
    );
}

#[test]
fn hide_fades_out_but_keeps_content() {
    let mut tooltip = Tooltip::hidden();
    tooltip.show(content(), 100.0, 100.0, PLOT_BAND, BAR_SHOW_DURATION);
    tooltip.hide(BAR_HIDE_DURATION);

    assert!(!tooltip.is_visible());
    assert_eq!(tooltip.content(), Some(&content()));
    let transition = tooltip.transition();
    assert_eq!(transition.from, TOOLTIP_VISIBLE_OPACITY);
    assert_eq!(transition.to, 0.0);
    assert_eq!(transition.duration, Duration::from_millis(500));
}

#[test]
fn top_is_clamped_inside_plot_band() {
    assert_eq!(clamp_tooltip_top(60.0, 56.0, 50.0, 350.0), 106.0);
    assert_eq!(clamp_tooltip_top(200.0, 56.0, 50.0, 350.0), 200.0);
    assert_eq!(clamp_tooltip_top(400.0, 56.0, 50.0, 350.0), 350.0);
}

#[test]
fn measured_height_changes_clamping() {
    let mut tooltip = Tooltip::hidden();
    tooltip.set_measured_height(20.0);
    tooltip.show(content(), 0.0, 60.0, PLOT_BAND, AREA_TRANSITION_DURATION);
    assert_eq!(tooltip.position(), (10.0, 70.0));

    tooltip.set_measured_height(f64::NAN);
    assert_eq!(tooltip.height_px(), 20.0);
}

#[test]
fn transition_eases_between_endpoints() {
    let transition = OpacityTransition {
        from: 0.0,
        to: 0.9,
        duration: Duration::from_millis(200),
    };
    assert_relative_eq!(transition.opacity_at(Duration::ZERO), 0.0);
    assert_relative_eq!(transition.opacity_at(Duration::from_millis(100)), 0.45, epsilon = 1e-12);
    assert_relative_eq!(transition.opacity_at(Duration::from_millis(200)), 0.9);
    assert!(transition.is_complete(Duration::from_millis(250)));
    assert!(!transition.is_complete(Duration::from_millis(150)));
}

#[test]
fn reshow_during_fade_out_starts_from_previous_target() {
    let mut tooltip = Tooltip::hidden();
    tooltip.show(content(), 0.0, 100.0, PLOT_BAND, BAR_SHOW_DURATION);
    tooltip.hide(BAR_HIDE_DURATION);
    tooltip.show(content(), 0.0, 100.0, PLOT_BAND, AREA_TRANSITION_DURATION);

    let transition = tooltip.transition();
    assert_eq!(transition.from, 0.0);
    assert_eq!(transition.to, TOOLTIP_VISIBLE_OPACITY);
}
