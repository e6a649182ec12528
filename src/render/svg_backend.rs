use std::fmt::Write;

use crate::core::PathSegment;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign, TooltipPrimitive};

const TOOLTIP_LINE_HEIGHT_PX: f64 = 16.0;
const TOOLTIP_PADDING_PX: f64 = 4.0;
const TOOLTIP_CHAR_WIDTH_PX: f64 = 7.0;
const TOOLTIP_FONT_SIZE_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub texts_drawn: usize,
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub tooltip_drawn: bool,
}

/// SVG markup backend.
///
/// Each `render` call replaces the stored document. Bars and areas keep
/// their class lists (`bar bar-<id>`, `area area-<id>`) so the output can be
/// styled or inspected the way a browser DOM would be.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    background: Option<Color>,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints a full-size background rect before any primitive.
    pub fn set_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.background = Some(color);
        Ok(())
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(&self, frame: &RenderFrame, out: &mut String) -> std::fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            frame.viewport.width, frame.viewport.height, frame.viewport.width, frame.viewport.height
        )?;

        if let Some(background) = self.background {
            writeln!(
                out,
                r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
                frame.viewport.width,
                frame.viewport.height,
                background.to_hex()
            )?;
        }

        for line in &frame.lines {
            writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
                num(line.x1),
                num(line.y1),
                num(line.x2),
                num(line.y2),
                line.color.to_hex(),
                num(line.stroke_width),
                alpha_attr("stroke-opacity", line.color.alpha)
            )?;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            writeln!(
                out,
                r#"  <text x="{}" y="{}" font-size="{}" text-anchor="{anchor}" fill="{}">{}</text>"#,
                num(text.x),
                num(text.y),
                num(text.font_size_px),
                text.color.to_hex(),
                escape_xml(&text.text)
            )?;
        }

        for rect in &frame.rects {
            writeln!(
                out,
                r#"  <rect class="{}" x="{}" y="{}" width="{}" height="{}" fill="{}" style="opacity: {}"/>"#,
                escape_xml(&rect.class_name),
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height),
                rect.fill_color.to_hex(),
                num(rect.opacity)
            )?;
        }

        for path in &frame.paths {
            writeln!(
                out,
                r#"  <path class="{}" d="{}" fill="{}" style="opacity: {}"/>"#,
                escape_xml(&path.class_name),
                path_data(&path.segments),
                path.fill_color.to_hex(),
                num(path.opacity)
            )?;
        }

        if let Some(tooltip) = &frame.tooltip {
            write_tooltip(out, tooltip)?;
        }

        out.push_str("</svg>\n");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut document = String::with_capacity(4096);
        self.write_document(frame, &mut document)
            .map_err(|err| map_backend_error("failed to write svg document", err))?;

        self.document = document;
        self.last_stats = SvgRenderStats {
            lines_drawn: frame.lines.len(),
            texts_drawn: frame.texts.len(),
            rects_drawn: frame.rects.len(),
            paths_drawn: frame.paths.len(),
            tooltip_drawn: frame.tooltip.is_some(),
        };
        Ok(())
    }
}

fn write_tooltip(out: &mut String, tooltip: &TooltipPrimitive) -> std::fmt::Result {
    let widest = tooltip
        .lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let width = widest as f64 * TOOLTIP_CHAR_WIDTH_PX + 2.0 * TOOLTIP_PADDING_PX;
    let height = tooltip.lines.len() as f64 * TOOLTIP_LINE_HEIGHT_PX + 2.0 * TOOLTIP_PADDING_PX;

    writeln!(
        out,
        r#"  <g class="tooltip" style="opacity: {}">"#,
        num(tooltip.opacity)
    )?;
    writeln!(
        out,
        r##"    <rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="#ffffff" stroke="#999999"/>"##,
        num(tooltip.left),
        num(tooltip.top),
        num(width),
        num(height)
    )?;
    for (index, line) in tooltip.lines.iter().enumerate() {
        let baseline = tooltip.top + TOOLTIP_PADDING_PX + (index as f64 + 0.8) * TOOLTIP_LINE_HEIGHT_PX;
        writeln!(
            out,
            r##"    <text x="{}" y="{}" font-size="{}" fill="#000000">{}</text>"##,
            num(tooltip.left + TOOLTIP_PADDING_PX),
            num(baseline),
            num(TOOLTIP_FONT_SIZE_PX),
            escape_xml(line)
        )?;
    }
    out.push_str("  </g>\n");
    Ok(())
}

fn path_data(segments: &[PathSegment]) -> String {
    let mut data = String::new();
    for segment in segments {
        if !data.is_empty() {
            data.push(' ');
        }
        match segment {
            PathSegment::MoveTo(point) => {
                data.push_str(&format!("M{},{}", num(point.x), num(point.y)));
            }
            PathSegment::LineTo(point) => {
                data.push_str(&format!("L{},{}", num(point.x), num(point.y)));
            }
            PathSegment::CubicTo {
                control1,
                control2,
                to,
            } => {
                data.push_str(&format!(
                    "C{},{},{},{},{},{}",
                    num(control1.x),
                    num(control1.y),
                    num(control2.x),
                    num(control2.y),
                    num(to.x),
                    num(to.y)
                ));
            }
            PathSegment::Close => data.push('Z'),
        }
    }
    data
}

fn alpha_attr(name: &str, alpha: f64) -> String {
    if alpha >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, num(alpha))
    }
}

/// Compact coordinate: at most three decimals, trailing zeros dropped.
fn num(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn map_backend_error(prefix: &str, err: std::fmt::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
