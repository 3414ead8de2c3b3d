use crate::core::{SeriesPoint, TimeScale, ValueScale, ValueSelector};
use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Vertex of a projected series path in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        Self {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }
}

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects every point of a series into a plot-local polyline.
///
/// The path is not clipped to the visible date window: months past the
/// domain end land beyond the right edge of the plot.
pub fn project_series_path(
    points: &[SeriesPoint],
    selector: ValueSelector,
    time_scale: TimeScale,
    value_scale: ValueScale,
) -> ChartResult<Vec<PathPoint>> {
    let mut path = Vec::with_capacity(points.len());
    for point in points {
        let x = time_scale.date_to_pixel(point.date)?;
        let y = value_scale.value_to_pixel(point.value(selector))?;
        path.push(PathPoint::new(x, y));
    }
    Ok(path)
}

/// Splits a polyline into adjacent segments.
#[must_use]
pub fn path_segments(path: &[PathPoint]) -> Vec<LineSegment> {
    path.windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].x,
            y1: pair[0].y,
            x2: pair[1].x,
            y2: pair[1].y,
        })
        .collect()
}
