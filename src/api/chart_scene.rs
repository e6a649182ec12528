use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use crate::core::{
    AreaGeometry, ChartScales, Record, closest_record, project_area_geometry, unique_ids,
};
use crate::error::ChartResult;
use crate::interaction::tooltip::{
    AREA_TRANSITION_DURATION, BAR_HIDE_DURATION, BAR_SHOW_DURATION,
};
use crate::interaction::{
    HoverTarget, MarkKey, MarkRegistry, ToggleTarget, Tooltip, TooltipContent, Visibility,
    toggle_selected,
};
use crate::render::{
    Color, PathPrimitive, RectPrimitive, RenderFrame, Renderer, TooltipPrimitive,
};

use super::axis::{AxisSet, axis_titles};
use super::color_scale::{CATEGORY10, OrdinalColorScale, SET3};
use super::ChartLayout;

/// One rectangle per dated record.
#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub record_index: usize,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl BarMark {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// One smoothed area per identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaMark {
    pub id: String,
    /// Indices of this id's records, in dataset order.
    pub record_indices: Vec<usize>,
    pub geometry: AreaGeometry,
    pub fill_color: Color,
}

/// A fully laid-out dual-axis chart plus its interaction state.
///
/// Geometry is fixed at build time; pointer, click and toggle calls only
/// change mark visibility, area draw order and the tooltip.
#[derive(Debug, Clone)]
pub struct ChartScene {
    layout: ChartLayout,
    records: Vec<Record>,
    unique_ids: Vec<String>,
    scales: ChartScales,
    axes: AxisSet,
    bars: Vec<BarMark>,
    areas: IndexMap<String, AreaMark>,
    registry: MarkRegistry,
    tooltip: Tooltip,
    hover: Option<HoverTarget>,
}

impl ChartScene {
    /// Builds scales, axes and marks in one pass.
    ///
    /// Fails with `ChartError::EmptyDataset` when `records` is empty and with
    /// `ChartError::InvalidData` when no record has a valid date.
    pub fn build(records: Vec<Record>, layout: ChartLayout) -> ChartResult<Self> {
        let layout = layout.validate()?;
        let scales = ChartScales::from_records(&records, layout.x_range(), layout.y_range())?;
        let axes = AxisSet::build(&scales, &layout);
        let ids = unique_ids(&records);

        let mut bar_colors = OrdinalColorScale::new(&SET3);
        let mut bars = Vec::with_capacity(records.len());
        for (record_index, record) in records.iter().enumerate() {
            let fill_color = bar_colors.color_for(&record.id);
            let Some(date) = record.date else {
                warn!(record_index, id = %record.id, "skipping bar for record without a valid date");
                continue;
            };

            let top = scales.left.map(record.value_bar);
            let height = layout.y_start - top;
            if height < 0.0 {
                trace!(record_index, value_bar = record.value_bar, "bar below baseline clamped");
            }
            bars.push(BarMark {
                record_index,
                id: record.id.clone(),
                x: scales.time.map(date),
                y: top.min(layout.y_start),
                width: layout.bar_width,
                height: height.max(0.0),
                fill_color,
            });
        }

        let mut area_colors = OrdinalColorScale::new(&CATEGORY10);
        let mut areas = IndexMap::with_capacity(ids.len());
        for id in &ids {
            let record_indices: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, record)| &record.id == id)
                .map(|(index, _)| index)
                .collect();

            let mut ordered: Vec<&Record> = record_indices.iter().map(|&index| &records[index]).collect();
            ordered.sort_by_key(|record| record.date);
            let geometry = project_area_geometry(&ordered, scales.time, scales.right, layout.y_start);

            areas.insert(
                id.clone(),
                AreaMark {
                    id: id.clone(),
                    record_indices,
                    geometry,
                    fill_color: area_colors.color_for(id),
                },
            );
        }

        let registry = MarkRegistry::new(&ids, Visibility::Dim);
        info!(
            record_count = records.len(),
            bar_count = bars.len(),
            area_count = areas.len(),
            "built chart scene"
        );

        Ok(Self {
            layout,
            records,
            unique_ids: ids,
            scales,
            axes,
            bars,
            areas,
            registry,
            tooltip: Tooltip::hidden(),
            hover: None,
        })
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn unique_ids(&self) -> &[String] {
        &self.unique_ids
    }

    #[must_use]
    pub fn scales(&self) -> ChartScales {
        self.scales
    }

    #[must_use]
    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    #[must_use]
    pub fn bars(&self) -> &[BarMark] {
        &self.bars
    }

    #[must_use]
    pub fn area(&self, id: &str) -> Option<&AreaMark> {
        self.areas.get(id)
    }

    pub fn areas(&self) -> impl Iterator<Item = &AreaMark> + '_ {
        self.areas.values()
    }

    #[must_use]
    pub fn registry(&self) -> &MarkRegistry {
        &self.registry
    }

    #[must_use]
    pub fn visibility(&self, key: &MarkKey) -> Option<Visibility> {
        self.registry.visibility(key)
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Reports the rendered tooltip height used for vertical clamping.
    pub fn set_tooltip_height(&mut self, height_px: f64) {
        self.tooltip.set_measured_height(height_px);
    }

    #[must_use]
    pub fn hover(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    /// Topmost mark under the point: areas (top of draw order first), then
    /// bars (last drawn first).
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<HoverTarget> {
        for id in self.registry.area_order().iter().rev() {
            if self
                .areas
                .get(id)
                .is_some_and(|area| area.geometry.contains(x, y))
            {
                return Some(HoverTarget::Area(id.clone()));
            }
        }

        self.bars
            .iter()
            .rposition(|bar| bar.contains(x, y))
            .map(HoverTarget::Bar)
    }

    /// Pointer moved to `(x, y)` in chart-local pixels.
    ///
    /// Entering a bar shows its record; every move over an area shows the
    /// area's record closest in time to the pointer.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&HoverTarget> {
        let hit = self.hit_test(x, y);
        if hit != self.hover {
            self.leave_current();
            if let Some(HoverTarget::Bar(index)) = hit {
                self.show_bar_tooltip(index, x, y);
            }
            self.hover = hit;
        }

        if let Some(HoverTarget::Area(id)) = &self.hover {
            let id = id.clone();
            self.show_area_tooltip(&id, x, y);
        }
        self.hover.as_ref()
    }

    /// Pointer left the chart surface.
    pub fn pointer_leave(&mut self) {
        self.leave_current();
    }

    /// Toggles the id of the clicked mark; `None` when nothing was hit.
    pub fn click(&mut self, x: f64, y: f64) -> Option<Visibility> {
        let id = match self.hit_test(x, y)? {
            HoverTarget::Bar(index) => self.bars[index].id.clone(),
            HoverTarget::Area(id) => id,
        };
        self.toggle(&ToggleTarget::Individual(id))
    }

    pub fn toggle(&mut self, target: &ToggleTarget) -> Option<Visibility> {
        toggle_selected(&mut self.registry, target)
    }

    fn leave_current(&mut self) {
        match self.hover.take() {
            Some(HoverTarget::Bar(_)) => self.tooltip.hide(BAR_HIDE_DURATION),
            Some(HoverTarget::Area(_)) => self.tooltip.hide(AREA_TRANSITION_DURATION),
            None => {}
        }
    }

    fn show_bar_tooltip(&mut self, bar_index: usize, x: f64, y: f64) {
        let Some(record) = self
            .bars
            .get(bar_index)
            .and_then(|bar| self.records.get(bar.record_index))
        else {
            return;
        };
        let content = tooltip_content(record);
        self.tooltip
            .show(content, x, y, self.layout.plot_band(), BAR_SHOW_DURATION);
    }

    fn show_area_tooltip(&mut self, id: &str, x: f64, y: f64) {
        let Some(query) = self.scales.time.invert(x) else {
            return;
        };
        let Some(area) = self.areas.get(id) else {
            return;
        };
        let candidates = area.record_indices.iter().map(|&index| &self.records[index]);
        let Some(record) = closest_record(candidates, query) else {
            return;
        };
        debug!(id, %query, "area hover resolved closest record");
        let content = tooltip_content(record);
        self.tooltip
            .show(content, x, y, self.layout.plot_band(), AREA_TRANSITION_DURATION);
    }

    fn opacity_of(&self, key: &MarkKey) -> f64 {
        self.registry
            .visibility(key)
            .unwrap_or(Visibility::Dim)
            .opacity(self.layout.dim_opacity, self.layout.full_opacity)
    }

    /// Materializes the current scene for a renderer.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.layout.viewport());
        self.axes.append_primitives(&mut frame.lines, &mut frame.texts);
        frame.texts.extend(axis_titles(&self.layout));

        for bar in &self.bars {
            frame.rects.push(
                RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, bar.fill_color)
                    .with_opacity(self.opacity_of(&MarkKey::bar(bar.id.as_str())))
                    .with_class(format!("bar bar-{}", bar.id)),
            );
        }

        for id in self.registry.area_order() {
            let Some(area) = self.areas.get(id) else {
                continue;
            };
            if area.geometry.is_empty() {
                continue;
            }
            frame.paths.push(
                PathPrimitive::new(area.geometry.path.clone(), area.fill_color)
                    .with_opacity(self.opacity_of(&MarkKey::area(id.as_str())))
                    .with_class(format!("area area-{id}")),
            );
        }

        if let Some(content) = self.tooltip.content().filter(|_| self.tooltip.is_visible()) {
            let (left, top) = self.tooltip.position();
            frame.tooltip = Some(TooltipPrimitive {
                left,
                top,
                lines: content.lines().to_vec(),
                opacity: self.tooltip.target_opacity(),
            });
        }

        frame
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        renderer.render(&self.frame())
    }
}

fn tooltip_content(record: &Record) -> TooltipContent {
    TooltipContent {
        id: record.id.clone(),
        value_area: record.value_area,
        value_bar: record.value_bar,
    }
}
