use dual_axis_chart::ChartError;
use dual_axis_chart::api::{ChartLayout, FetchConfig, join_url};

#[test]
fn default_layout_matches_fixed_chart_geometry() {
    let layout = ChartLayout::default();
    assert_eq!((layout.container_width, layout.container_height), (800, 400));
    assert_eq!(layout.x_range(), (60.0, 730.0));
    assert_eq!(layout.y_range(), (350.0, 50.0));
    assert_eq!(layout.plot_band(), (50.0, 350.0));
    assert_eq!(layout.ticks, 5);
    assert_eq!(layout.bar_width, 10.0);
    assert!(layout.validate().is_ok());
}

#[test]
fn layout_json_round_trips() {
    let layout = ChartLayout {
        bar_width: 6.0,
        ..ChartLayout::default()
    };
    let json = serde_json::to_string(&layout).expect("layout should serialize");
    let restored: ChartLayout = serde_json::from_str(&json).expect("layout should parse");
    assert_eq!(restored, layout);
}

#[test]
fn incoherent_layouts_are_rejected() {
    let zero = ChartLayout {
        container_width: 0,
        ..ChartLayout::default()
    };
    assert!(matches!(
        zero.validate(),
        Err(ChartError::InvalidViewport { width: 0, .. })
    ));

    let flipped = ChartLayout {
        x_start: 740.0,
        ..ChartLayout::default()
    };
    assert!(flipped.validate().is_err());

    let opacity = ChartLayout {
        dim_opacity: 1.0,
        ..ChartLayout::default()
    };
    assert!(opacity.validate().is_err());

    let no_ticks = ChartLayout {
        ticks: 0,
        ..ChartLayout::default()
    };
    assert!(no_ticks.validate().is_err());
}

#[test]
fn default_fetch_config_targets_dataset_endpoint() {
    let config = FetchConfig::default();
    assert_eq!(config.url(), "https://wanted-backend-week4.vercel.app/db.json");
    assert_eq!(join_url("http://host///", "//a.json"), "http://host/a.json");
    assert!(
        FetchConfig {
            base_url: "  ".to_owned(),
            ..FetchConfig::default()
        }
        .validate()
        .is_err()
    );
}
