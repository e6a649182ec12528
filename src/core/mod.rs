pub mod area_series;
pub mod chart_scales;
pub mod nearest;
pub mod normalize;
pub mod primitives;
pub mod record;
pub mod scale;
pub mod time_interval;
pub mod time_scale;
pub mod types;

pub use area_series::{AreaGeometry, AreaVertex, PathSegment, project_area_geometry};
pub use chart_scales::ChartScales;
pub use nearest::closest_record;
pub use normalize::{RawEntry, RawResponse, normalize_payload, normalize_raw_response};
pub use record::{Record, parse_record_date, unique_ids};
pub use scale::LinearScale;
pub use time_interval::{TimeInterval, TimeUnit, tick_interval};
pub use time_scale::TimeScale;
pub use types::Viewport;
