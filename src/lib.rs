//! dual-axis-chart: headless dual-axis (bar + area) time-series chart engine.
//!
//! A dataset keyed by timestamps is normalized into records, laid out once
//! into a [`api::ChartScene`] and then driven by pointer, click and toggle
//! events. Scenes materialize as backend-agnostic [`render::RenderFrame`]s;
//! an SVG backend ships with the crate.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartLayout, ChartScene, ChartView};
pub use error::{ChartError, ChartResult};
