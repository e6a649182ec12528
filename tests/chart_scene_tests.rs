use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use dual_axis_chart::api::{CATEGORY10, ChartLayout, ChartScene, SET3};
use dual_axis_chart::core::Record;
use dual_axis_chart::interaction::{HoverTarget, MarkKey, ToggleTarget, Visibility};
use dual_axis_chart::render::NullRenderer;
use dual_axis_chart::ChartError;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn sample_records() -> Vec<Record> {
    vec![
        Record::new(Some(at(1, 0)), "a", 5.0, 10.0),
        Record::new(Some(at(1, 12)), "b", 10.0, 20.0),
        Record::new(Some(at(2, 0)), "a", 2.5, 5.0),
    ]
}

fn sample_scene() -> ChartScene {
    ChartScene::build(sample_records(), ChartLayout::default()).expect("scene should build")
}

#[test]
fn bars_are_laid_out_from_scales() {
    let scene = sample_scene();
    let bars = scene.bars();
    assert_eq!(bars.len(), 3);

    assert_relative_eq!(bars[0].x, 60.0);
    assert_relative_eq!(bars[0].y, 200.0);
    assert_relative_eq!(bars[0].height, 150.0);
    assert_relative_eq!(bars[0].width, 10.0);

    assert_relative_eq!(bars[1].x, 395.0);
    assert_relative_eq!(bars[1].y, 50.0);
    assert_relative_eq!(bars[1].height, 300.0);

    assert_relative_eq!(bars[2].x, 730.0);
    assert_relative_eq!(bars[2].y, 275.0);
    assert_relative_eq!(bars[2].height, 75.0);

    assert_eq!(bars[0].fill_color, SET3[0]);
    assert_eq!(bars[1].fill_color, SET3[1]);
    assert_eq!(bars[2].fill_color, SET3[0]);
}

#[test]
fn one_area_per_id_sorted_by_date() {
    let mut records = sample_records();
    records.swap(0, 2);
    let scene = ChartScene::build(records, ChartLayout::default()).expect("scene should build");

    let area = scene.area("a").expect("area for a");
    assert_eq!(area.fill_color, CATEGORY10[0]);
    assert_eq!(area.record_indices, vec![0, 2]);
    let xs: Vec<f64> = area.geometry.line_points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![60.0, 730.0]);
    assert_relative_eq!(area.geometry.line_points[0].y, 200.0);
    assert_relative_eq!(area.geometry.line_points[1].y, 275.0);

    assert_eq!(scene.area("b").expect("area for b").fill_color, CATEGORY10[1]);
    assert_eq!(scene.areas().count(), 2);
}

#[test]
fn every_mark_starts_dim() {
    let scene = sample_scene();
    for id in ["a", "b"] {
        assert_eq!(scene.visibility(&MarkKey::bar(id)), Some(Visibility::Dim));
        assert_eq!(scene.visibility(&MarkKey::area(id)), Some(Visibility::Dim));
    }
    assert_eq!(scene.unique_ids(), ["a".to_owned(), "b".to_owned()].as_slice());
}

#[test]
fn empty_and_undated_sets_do_not_build() {
    let err = ChartScene::build(Vec::new(), ChartLayout::default()).expect_err("empty");
    assert!(matches!(err, ChartError::EmptyDataset));

    let undated = vec![Record::new(None, "a", 1.0, 1.0)];
    let err = ChartScene::build(undated, ChartLayout::default()).expect_err("undated");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn undated_record_gets_no_bar_but_keeps_its_id() {
    let mut records = sample_records();
    records.push(Record::new(None, "c", 40.0, 1.0));
    let scene = ChartScene::build(records, ChartLayout::default()).expect("scene should build");

    assert_eq!(scene.bars().len(), 3);
    assert!(scene.registry().contains_id("c"));
    assert!(scene.area("c").expect("area for c").geometry.is_empty());
    assert_eq!(scene.scales().left.domain(), (0.0, 40.0));
}

#[test]
fn hit_test_prefers_areas_over_bars() {
    let scene = sample_scene();
    // Inside bar b, above area a.
    assert_eq!(scene.hit_test(400.0, 100.0), Some(HoverTarget::Bar(1)));
    // Inside bar a and area a.
    assert_eq!(
        scene.hit_test(65.0, 300.0),
        Some(HoverTarget::Area("a".to_owned()))
    );
    assert_eq!(
        scene.hit_test(300.0, 300.0),
        Some(HoverTarget::Area("a".to_owned()))
    );
    assert_eq!(scene.hit_test(300.0, 100.0), None);
}

#[test]
fn bar_hover_shows_record_and_leave_hides() {
    let mut scene = sample_scene();
    let hover = scene.pointer_move(400.0, 100.0).cloned();
    assert_eq!(hover, Some(HoverTarget::Bar(1)));

    let tooltip = scene.tooltip();
    assert!(tooltip.is_visible());
    let content = tooltip.content().expect("content");
    assert_eq!(content.id, "b");
    assert_eq!(content.value_bar, 10.0);
    assert_eq!(content.value_area, 20.0);
    assert_eq!(tooltip.position(), (410.0, 106.0));

    scene.pointer_leave();
    assert!(!scene.tooltip().is_visible());
    assert!(scene.hover().is_none());
}

#[test]
fn area_hover_tracks_closest_record_of_that_id() {
    let mut scene = sample_scene();
    scene.pointer_move(300.0, 300.0);
    let content = scene.tooltip().content().expect("content");
    assert_eq!(content.id, "a");
    assert_eq!(content.value_area, 10.0);
    assert_eq!(content.value_bar, 5.0);

    scene.pointer_move(600.0, 330.0);
    let content = scene.tooltip().content().expect("content");
    assert_eq!(content.value_area, 5.0);
    assert_eq!(scene.tooltip().position(), (610.0, 330.0));
}

#[test]
fn moving_off_marks_hides_tooltip() {
    let mut scene = sample_scene();
    scene.pointer_move(400.0, 100.0);
    assert!(scene.pointer_move(300.0, 100.0).is_none());
    assert!(!scene.tooltip().is_visible());
}

#[test]
fn click_toggles_hit_id() {
    let mut scene = sample_scene();
    assert_eq!(scene.click(400.0, 100.0), Some(Visibility::Full));
    assert_eq!(scene.visibility(&MarkKey::bar("b")), Some(Visibility::Full));
    assert_eq!(scene.visibility(&MarkKey::area("b")), Some(Visibility::Full));
    assert_eq!(scene.visibility(&MarkKey::bar("a")), Some(Visibility::Dim));

    assert_eq!(scene.click(300.0, 100.0), None);
}

#[test]
fn frame_reflects_visibility_and_draw_order() {
    let mut scene = sample_scene();
    scene.toggle(&ToggleTarget::Individual("b".to_owned()));
    scene.toggle(&ToggleTarget::Individual("a".to_owned()));

    let frame = scene.frame();
    frame.validate().expect("frame should be valid");

    assert_eq!(frame.rects.len(), 3);
    assert_eq!(frame.rects[1].class_name, "bar bar-b");
    assert_eq!(frame.rects[1].opacity, 1.0);

    let classes: Vec<&str> = frame.paths.iter().map(|p| p.class_name.as_str()).collect();
    assert_eq!(classes, vec!["area area-b", "area area-a"]);

    scene.toggle(&ToggleTarget::Individual("a".to_owned()));
    let frame = scene.frame();
    let area_a = frame
        .paths
        .iter()
        .find(|p| p.class_name == "area area-a")
        .expect("area a drawn");
    assert_eq!(area_a.opacity, 0.1);
    assert!(frame.tooltip.is_none());
}

#[test]
fn frame_contains_axis_titles_and_two_line_time_labels() {
    let scene = sample_scene();
    let frame = scene.frame();
    let texts: Vec<&str> = frame.texts.iter().map(|t| t.text.as_str()).collect();

    assert!(texts.contains(&"bar"));
    assert!(texts.contains(&"area"));
    assert!(texts.contains(&"10.00"));
    assert!(texts.contains(&"20.00"));
    assert!(texts.contains(&"12:00:00"));
    assert!(texts.contains(&"2024-01-02"));
}

#[test]
fn hovered_scene_renders_tooltip_overlay() {
    let mut scene = sample_scene();
    scene.pointer_move(400.0, 100.0);
    let frame = scene.frame();
    let tooltip = frame.tooltip.expect("tooltip visible");
    assert_eq!(tooltip.lines[0], "ID: b");
    assert_eq!(tooltip.opacity, 0.9);

    let mut renderer = NullRenderer::default();
    scene.render(&mut renderer).expect("render should succeed");
    assert_eq!(renderer.last_rect_count, 3);
    assert_eq!(renderer.last_path_count, 2);
}
