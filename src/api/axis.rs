use smallvec::{SmallVec, smallvec};

use crate::core::ChartScales;
use crate::render::{Color, LinePrimitive, TextHAlign, TextPrimitive};

use super::ChartLayout;

const VALUE_AXIS_TICK_SIZE_PX: f64 = 6.0;
const TICK_PADDING_PX: f64 = 3.0;
/// Gap between the plot's right edge and the right value axis.
const RIGHT_AXIS_GAP_PX: f64 = 10.0;
const TICK_FONT_SIZE_PX: f64 = 10.0;
const TICK_LINE_HEIGHT_EM: f64 = 1.2;
const TITLE_FONT_SIZE_PX: f64 = 14.0;
const AXIS_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
const AXIS_STROKE_WIDTH: f64 = 1.0;

pub const LEFT_AXIS_TITLE: &str = "bar";
pub const RIGHT_AXIS_TITLE: &str = "area";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Left,
    Right,
    Bottom,
}

/// One tick: its pixel position along the axis and its label lines.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: SmallVec<[String; 2]>,
}

/// Laid-out axis; `offset` is the x of a vertical axis or the y of the
/// bottom axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisModel {
    pub orientation: AxisOrientation,
    pub offset: f64,
    pub range: (f64, f64),
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub ticks: Vec<AxisTick>,
}

/// Left (bar values), right (area values) and bottom (time) axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSet {
    pub left: AxisModel,
    pub right: AxisModel,
    pub bottom: AxisModel,
}

impl AxisSet {
    #[must_use]
    pub fn build(scales: &ChartScales, layout: &ChartLayout) -> Self {
        let value_ticks = |scale: crate::core::LinearScale| {
            scale
                .ticks(layout.ticks)
                .into_iter()
                .map(|value| AxisTick {
                    position: scale.map(value),
                    label: smallvec![format_axis_value(value)],
                })
                .collect::<Vec<_>>()
        };

        let left = AxisModel {
            orientation: AxisOrientation::Left,
            offset: layout.x_start,
            range: scales.left.range(),
            tick_size_inner: VALUE_AXIS_TICK_SIZE_PX,
            tick_size_outer: VALUE_AXIS_TICK_SIZE_PX,
            ticks: value_ticks(scales.left),
        };
        let right = AxisModel {
            orientation: AxisOrientation::Right,
            offset: layout.x_end + RIGHT_AXIS_GAP_PX,
            range: scales.right.range(),
            tick_size_inner: VALUE_AXIS_TICK_SIZE_PX,
            tick_size_outer: VALUE_AXIS_TICK_SIZE_PX,
            ticks: value_ticks(scales.right),
        };
        let bottom = AxisModel {
            orientation: AxisOrientation::Bottom,
            offset: layout.y_start,
            range: scales.time.range(),
            tick_size_inner: layout.tick_size,
            tick_size_outer: layout.tick_size,
            ticks: scales
                .time
                .ticks(layout.ticks)
                .into_iter()
                .map(|time| AxisTick {
                    position: scales.time.map(time),
                    label: smallvec![
                        time.format("%H:%M:%S").to_string(),
                        time.format("%Y-%m-%d").to_string(),
                    ],
                })
                .collect(),
        };

        Self {
            left,
            right,
            bottom,
        }
    }

    pub fn append_primitives(&self, lines: &mut Vec<LinePrimitive>, texts: &mut Vec<TextPrimitive>) {
        for axis in [&self.left, &self.right, &self.bottom] {
            axis.append_primitives(lines, texts);
        }
    }
}

impl AxisModel {
    /// Domain line with outer ticks, inner tick lines and tick labels.
    pub fn append_primitives(&self, lines: &mut Vec<LinePrimitive>, texts: &mut Vec<TextPrimitive>) {
        let line = |x1, y1, x2, y2| LinePrimitive::new(x1, y1, x2, y2, AXIS_STROKE_WIDTH, AXIS_COLOR);
        let (r0, r1) = self.range;
        let offset = self.offset;

        match self.orientation {
            AxisOrientation::Left | AxisOrientation::Right => {
                let k = if self.orientation == AxisOrientation::Left {
                    -1.0
                } else {
                    1.0
                };
                let outer = offset + k * self.tick_size_outer;
                lines.push(line(outer, r0, offset, r0));
                lines.push(line(offset, r0, offset, r1));
                lines.push(line(offset, r1, outer, r1));

                let align = if k < 0.0 {
                    TextHAlign::Right
                } else {
                    TextHAlign::Left
                };
                let label_x = offset + k * (self.tick_size_inner + TICK_PADDING_PX);
                for tick in &self.ticks {
                    lines.push(line(offset, tick.position, offset + k * self.tick_size_inner, tick.position));
                    for text in &tick.label {
                        texts.push(TextPrimitive::new(
                            text.as_str(),
                            label_x,
                            tick.position + 0.32 * TICK_FONT_SIZE_PX,
                            TICK_FONT_SIZE_PX,
                            AXIS_COLOR,
                            align,
                        ));
                    }
                }
            }
            AxisOrientation::Bottom => {
                let outer = offset + self.tick_size_outer;
                lines.push(line(r0, outer, r0, offset));
                lines.push(line(r0, offset, r1, offset));
                lines.push(line(r1, offset, r1, outer));

                let label_top = offset + self.tick_size_inner + TICK_PADDING_PX;
                for tick in &self.ticks {
                    lines.push(line(tick.position, offset, tick.position, offset + self.tick_size_inner));
                    for (row, text) in tick.label.iter().enumerate() {
                        let baseline =
                            label_top + (row as f64 + 1.0) * TICK_LINE_HEIGHT_EM * TICK_FONT_SIZE_PX;
                        texts.push(TextPrimitive::new(
                            text.as_str(),
                            tick.position,
                            baseline,
                            TICK_FONT_SIZE_PX,
                            AXIS_COLOR,
                            TextHAlign::Center,
                        ));
                    }
                }
            }
        }
    }
}

/// "bar" over the left axis and "area" over the right one.
#[must_use]
pub fn axis_titles(layout: &ChartLayout) -> [TextPrimitive; 2] {
    let half_margin = layout.x_start / 2.0;
    [
        TextPrimitive::new(
            LEFT_AXIS_TITLE,
            half_margin,
            layout.y_end,
            TITLE_FONT_SIZE_PX,
            AXIS_COLOR,
            TextHAlign::Center,
        ),
        TextPrimitive::new(
            RIGHT_AXIS_TITLE,
            f64::from(layout.container_width) - half_margin,
            layout.y_end,
            TITLE_FONT_SIZE_PX,
            AXIS_COLOR,
            TextHAlign::Center,
        ),
    ]
}

/// Two fixed decimals; negatives use U+2212 unless they round to zero.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    let magnitude = format!("{:.2}", value.abs());
    if value < 0.0 && magnitude.bytes().any(|byte| matches!(byte, b'1'..=b'9')) {
        format!("\u{2212}{magnitude}")
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::format_axis_value;

    #[test]
    fn value_labels_use_two_decimals() {
        assert_eq!(format_axis_value(2.0), "2.00");
        assert_eq!(format_axis_value(0.126), "0.13");
        assert_eq!(format_axis_value(-1.5), "\u{2212}1.50");
        assert_eq!(format_axis_value(-0.001), "0.00");
    }
}
