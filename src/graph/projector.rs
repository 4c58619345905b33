// SPDX-License-Identifier: MIT
//! Coordinate math for the frame-time plot.
//!
//! Plot space is pixel-like: x grows to the right and y grows downward, so a
//! larger millisecond value is drawn closer to `y_min`. Nothing here clamps;
//! callers decide whether out-of-range values are clipped.

use crate::error::{BenchError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned plot rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PlotRect {
    #[must_use]
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Shrinks the rectangle by `padding` on every side and by a further
    /// `label_gutter` on the right, where gridline labels are drawn.
    #[must_use]
    pub fn inset(&self, padding: f64, label_gutter: f64) -> Self {
        Self {
            x_min: self.x_min + padding,
            y_min: self.y_min + padding,
            x_max: self.x_max - padding - label_gutter,
            y_max: self.y_max - padding,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline {
    pub y: f64,
    pub label_ms: f64,
}

#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse of [`lerp`]: where `ms` falls between `ms_min` and `ms_max`.
///
/// Not clamped. A zero-width range maps everything to 0.
#[must_use]
pub fn lerp_value(ms: f64, ms_min: f64, ms_max: f64) -> f64 {
    let span = ms_max - ms_min;
    if span == 0.0 {
        return 0.0;
    }
    (ms - ms_min) / span
}

/// Maps sample `index` of a `total_points`-long series to plot space.
///
/// # Errors
///
/// Returns `DegenerateSeries` when the series has fewer than two points.
pub fn project_point(
    rect: &PlotRect,
    index: usize,
    value: f64,
    total_points: usize,
    ms_min: f64,
    ms_max: f64,
) -> Result<Point> {
    if total_points <= 1 {
        return Err(BenchError::DegenerateSeries(total_points));
    }
    #[allow(clippy::cast_precision_loss)]
    let t = index as f64 / (total_points - 1) as f64;
    let x = lerp(rect.x_min, rect.x_max, t);
    let y = rect.y_max - rect.height() * lerp_value(value, ms_min, ms_max);
    Ok(Point::new(x, y))
}

/// Horizontal position of a frame on the logical timeline.
///
/// Divides by the declared frame budget, not `budget - 1`, so a frame
/// index lines up with where that frame would sit in a full-length run.
///
/// # Errors
///
/// Returns `DegenerateSeries` for a zero frame budget.
pub fn project_frame_index_to_x(
    rect: &PlotRect,
    frame_index: usize,
    total_frames: usize,
) -> Result<f64> {
    if total_frames == 0 {
        return Err(BenchError::DegenerateSeries(0));
    }
    #[allow(clippy::cast_precision_loss)]
    let t = frame_index as f64 / total_frames as f64;
    Ok(lerp(rect.x_min, rect.x_max, t))
}

/// Frame under plot coordinate `x`, on the same timeline as
/// [`project_frame_index_to_x`]. Clamped to `0..=total_frames`.
#[must_use]
pub fn frame_index_at_x(rect: &PlotRect, x: f64, total_frames: usize) -> usize {
    let t = lerp_value(x, rect.x_min, rect.x_max);
    #[allow(clippy::cast_precision_loss)]
    let frame = (t * total_frames as f64).round();
    if frame <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let frame = frame as usize;
    frame.min(total_frames)
}

/// Evenly spaced horizontal gridlines from `y_max` (labelled `ms_min`) up to
/// `y_min` (labelled `ms_max`).
#[must_use]
pub fn gridlines(rect: &PlotRect, ms_min: f64, ms_max: f64, count: usize) -> Vec<Gridline> {
    match count {
        0 => Vec::new(),
        1 => vec![Gridline {
            y: rect.y_max,
            label_ms: ms_min,
        }],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let t = i as f64 / last;
                    Gridline {
                        y: lerp(rect.y_max, rect.y_min, t),
                        label_ms: lerp(ms_min, ms_max, t),
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn rect() -> PlotRect {
        PlotRect::new(20.0, 20.0, 420.0, 220.0)
    }

    #[test]
    fn lerp_value_round_trips() {
        let (a, b) = (0.0, 33.33);
        for x in [0.5, 8.3, 16.7, 25.0, 33.0] {
            let t = lerp_value(x, a, b);
            assert!((lerp(a, b, t) - x).abs() < EPS);
        }
    }

    #[test]
    fn lerp_value_is_unclamped() {
        assert!((lerp_value(40.0, 0.0, 20.0) - 2.0).abs() < EPS);
        assert!((lerp_value(-10.0, 0.0, 20.0) + 0.5).abs() < EPS);
    }

    #[test]
    fn lerp_value_zero_span() {
        assert!(lerp_value(5.0, 3.0, 3.0).abs() < EPS);
    }

    #[test]
    fn project_point_corners() {
        let r = rect();
        let first = project_point(&r, 0, 0.0, 5, 0.0, 40.0).unwrap();
        assert!((first.x - r.x_min).abs() < EPS);
        assert!((first.y - r.y_max).abs() < EPS);

        let last = project_point(&r, 4, 40.0, 5, 0.0, 40.0).unwrap();
        assert!((last.x - r.x_max).abs() < EPS);
        assert!((last.y - r.y_min).abs() < EPS);

        let mid = project_point(&r, 2, 10.0, 5, 0.0, 40.0).unwrap();
        assert!((mid.x - 220.0).abs() < EPS);
        assert!((mid.y - 170.0).abs() < EPS);
    }

    #[test]
    fn larger_values_plot_higher() {
        let r = rect();
        let low = project_point(&r, 1, 5.0, 3, 0.0, 30.0).unwrap();
        let high = project_point(&r, 1, 25.0, 3, 0.0, 30.0).unwrap();
        assert!(high.y < low.y);
    }

    #[test]
    fn single_point_series_is_degenerate() {
        assert!(matches!(
            project_point(&rect(), 0, 1.0, 1, 0.0, 2.0),
            Err(BenchError::DegenerateSeries(1))
        ));
        assert!(matches!(
            project_point(&rect(), 0, 1.0, 0, 0.0, 2.0),
            Err(BenchError::DegenerateSeries(0))
        ));
    }

    #[test]
    fn frame_markers_use_frame_budget() {
        let r = rect();
        // 3 samples recorded, but a budget of 4 frames.
        let x = project_frame_index_to_x(&r, 2, 4).unwrap();
        assert!((x - 220.0).abs() < EPS);
        let end = project_frame_index_to_x(&r, 4, 4).unwrap();
        assert!((end - r.x_max).abs() < EPS);
        assert!(project_frame_index_to_x(&r, 0, 0).is_err());
    }

    #[test]
    fn frame_index_inverse() {
        let r = rect();
        for frame in [0, 1, 37, 99, 100] {
            let x = project_frame_index_to_x(&r, frame, 100).unwrap();
            assert_eq!(frame_index_at_x(&r, x, 100), frame);
        }
        assert_eq!(frame_index_at_x(&r, r.x_min - 50.0, 100), 0);
        assert_eq!(frame_index_at_x(&r, r.x_max + 50.0, 100), 100);
    }

    #[test]
    fn five_gridlines() {
        let r = rect();
        let lines = gridlines(&r, 0.0, 40.0, 5);
        assert_eq!(lines.len(), 5);
        assert!((lines[0].y - r.y_max).abs() < EPS);
        assert!(lines[0].label_ms.abs() < EPS);
        assert!((lines[2].y - 120.0).abs() < EPS);
        assert!((lines[2].label_ms - 20.0).abs() < EPS);
        assert!((lines[4].y - r.y_min).abs() < EPS);
        assert!((lines[4].label_ms - 40.0).abs() < EPS);
    }

    #[test]
    fn gridline_edge_counts() {
        assert!(gridlines(&rect(), 0.0, 10.0, 0).is_empty());
        let one = gridlines(&rect(), 0.0, 10.0, 1);
        assert_eq!(one.len(), 1);
        assert!((one[0].y - 220.0).abs() < EPS);
    }

    #[test]
    fn inset_leaves_label_gutter() {
        let r = PlotRect::new(0.0, 0.0, 500.0, 300.0).inset(20.0, 40.0);
        assert_eq!(r, PlotRect::new(20.0, 20.0, 440.0, 280.0));
    }
}
