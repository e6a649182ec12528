mod axis;
mod chart_config;
mod chart_scene;
mod chart_view;
mod color_scale;
mod fetcher;
mod scene_snapshot;

pub use axis::{
    AxisModel, AxisOrientation, AxisSet, AxisTick, LEFT_AXIS_TITLE, RIGHT_AXIS_TITLE,
    axis_titles, format_axis_value,
};
pub use chart_config::ChartLayout;
pub use chart_scene::{AreaMark, BarMark, ChartScene};
pub use chart_view::{
    ALL_BUTTON_LABEL, ChartView, ControlButton, ControlPanel, LOADING_PLACEHOLDER, LoadOutcome,
    LoadTicket,
};
pub use color_scale::{CATEGORY10, OrdinalColorScale, SET3};
pub use fetcher::{
    DEFAULT_BASE_URL, DEFAULT_DATASET_PATH, DEFAULT_FETCH_TIMEOUT, DatasetSource, FetchConfig,
    FileDatasetSource, HttpDatasetSource, StaticDatasetSource, empty_fallback, join_url,
};
pub use scene_snapshot::{
    IdVisibility, SCENE_SNAPSHOT_JSON_SCHEMA_V1, SceneSnapshot, SceneSnapshotJsonContractV1,
    TooltipSnapshot,
};
