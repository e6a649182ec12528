use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, Record, TimeScale};

/// Centripetal parameterization of the Catmull-Rom top edge.
const CATMULL_ROM_ALPHA: f64 = 0.5;
const EPSILON: f64 = 1e-12;
/// Line segments per cubic when flattening the outline for hit testing.
const FLATTEN_STEPS: usize = 8;

/// Vertex in pixel coordinates used by deterministic area geometry output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaVertex {
    pub x: f64,
    pub y: f64,
}

impl AreaVertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Path command in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo(AreaVertex),
    LineTo(AreaVertex),
    CubicTo {
        control1: AreaVertex,
        control2: AreaVertex,
        to: AreaVertex,
    },
    Close,
}

/// Deterministic geometry for one area mark.
///
/// `line_points` are the mapped data points, `path` is the smoothed closed
/// outline against the baseline, `outline` is `path` flattened to a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub line_points: Vec<AreaVertex>,
    pub path: Vec<PathSegment>,
    pub outline: Vec<AreaVertex>,
}

impl AreaGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            line_points: Vec::new(),
            path: Vec::new(),
            outline: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Even-odd containment test against the flattened outline.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.outline.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut previous = self.outline[self.outline.len() - 1];
        for &current in &self.outline {
            if (current.y > y) != (previous.y > y) {
                let crossing_x = current.x
                    + (y - current.y) * (previous.x - current.x) / (previous.y - current.y);
                if x < crossing_x {
                    inside = !inside;
                }
            }
            previous = current;
        }
        inside
    }
}

/// Projects one id-group into a smoothed area closed against `baseline_y`.
///
/// `records` must already be in draw order (ascending date); records without
/// a valid date are skipped.
#[must_use]
pub fn project_area_geometry(
    records: &[&Record],
    time_scale: TimeScale,
    value_scale: LinearScale,
    baseline_y: f64,
) -> AreaGeometry {
    let line_points: Vec<AreaVertex> = records
        .iter()
        .filter_map(|record| {
            let date = record.date?;
            Some(AreaVertex::new(
                time_scale.map(date),
                value_scale.map(record.value_area),
            ))
        })
        .collect();

    let (Some(&first), Some(&last)) = (line_points.first(), line_points.last()) else {
        return AreaGeometry::empty();
    };

    let mut path = Vec::with_capacity(line_points.len() + 4);
    path.push(PathSegment::MoveTo(first));
    path.extend(catmull_rom_segments(&line_points));
    path.push(PathSegment::LineTo(AreaVertex::new(last.x, baseline_y)));
    path.push(PathSegment::LineTo(AreaVertex::new(first.x, baseline_y)));
    path.push(PathSegment::Close);

    let outline = flatten_path(&path);
    AreaGeometry {
        line_points,
        path,
        outline,
    }
}

/// Curve segments joining consecutive points (the initial `MoveTo` excluded).
///
/// Two points produce a straight line. End segments keep their endpoint as
/// the outer control point.
#[must_use]
pub fn catmull_rom_segments(points: &[AreaVertex]) -> Vec<PathSegment> {
    match points.len() {
        0 | 1 => return Vec::new(),
        2 => return vec![PathSegment::LineTo(points[1])],
        _ => {}
    }

    let chord = |a: AreaVertex, b: AreaVertex| {
        let squared = (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
        let two_alpha = squared.powf(CATMULL_ROM_ALPHA);
        (two_alpha.sqrt(), two_alpha)
    };

    let mut segments = Vec::with_capacity(points.len() - 1);
    for index in 0..points.len() - 1 {
        let p1 = points[index];
        let p2 = points[index + 1];
        let (l12_a, l12_2a) = chord(p1, p2);

        let mut control1 = p1;
        if index > 0 {
            let p0 = points[index - 1];
            let (l01_a, l01_2a) = chord(p0, p1);
            if l01_a > EPSILON {
                let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
                let n = 3.0 * l01_a * (l01_a + l12_a);
                control1 = AreaVertex::new(
                    (p1.x * a - p0.x * l12_2a + p2.x * l01_2a) / n,
                    (p1.y * a - p0.y * l12_2a + p2.y * l01_2a) / n,
                );
            }
        }

        let (p3, (l23_a, l23_2a)) = match points.get(index + 2) {
            Some(&p3) => (p3, chord(p2, p3)),
            None => (p2, (0.0, 0.0)),
        };
        let mut control2 = p2;
        if l23_a > EPSILON {
            let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
            let m = 3.0 * l23_a * (l23_a + l12_a);
            control2 = AreaVertex::new(
                (p2.x * b + p1.x * l23_2a - p3.x * l12_2a) / m,
                (p2.y * b + p1.y * l23_2a - p3.y * l12_2a) / m,
            );
        }

        segments.push(PathSegment::CubicTo {
            control1,
            control2,
            to: p2,
        });
    }
    segments
}

fn flatten_path(path: &[PathSegment]) -> Vec<AreaVertex> {
    let mut outline = Vec::new();
    let mut cursor = None::<AreaVertex>;

    for segment in path {
        match *segment {
            PathSegment::MoveTo(point) | PathSegment::LineTo(point) => {
                outline.push(point);
                cursor = Some(point);
            }
            PathSegment::CubicTo {
                control1,
                control2,
                to,
            } => {
                let from = cursor.unwrap_or(to);
                for step in 1..=FLATTEN_STEPS {
                    let t = step as f64 / FLATTEN_STEPS as f64;
                    outline.push(cubic_point(from, control1, control2, to, t));
                }
                cursor = Some(to);
            }
            PathSegment::Close => {}
        }
    }
    outline
}

fn cubic_point(p0: AreaVertex, p1: AreaVertex, p2: AreaVertex, p3: AreaVertex, t: f64) -> AreaVertex {
    let u = 1.0 - t;
    let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    AreaVertex::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}
