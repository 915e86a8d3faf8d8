//! Spline flattening and guide-path preparation.
//!
//! Guide curves arrive as spline control points. They are flattened into a
//! polyline (chained quadratic or cubic Bezier segments, selected by
//! [`SplineType`]), then prepared for scanning: shifted so the curve's
//! bounding box sits at the origin, and re-sampled to one point per unit of
//! traversed distance. The unit re-sampling deliberately approximates
//! arc-length parametrization so that source content stays proportionally
//! spaced along the curve even where it folds back on itself.

use crate::error::{TransformError, TransformResult};
use pixwarp_core::{Path, Point};

/// Which flattening algorithm converts control points to a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineType {
    /// Chained quadratic Bezier segments (overlapping point triples)
    #[default]
    Quadratic,
    /// Chained cubic Bezier segments (overlapping point quadruples)
    Cubic,
}

/// Flatten spline control points into a polyline.
///
/// Control points are consumed in chained segments: triples stepping by two
/// for quadratic splines, quadruples stepping by three for cubic. Trailing
/// points that do not fill a whole segment, or a control path shorter than
/// one segment, pass through as plain polyline vertices.
pub fn flatten(control: &Path, kind: SplineType) -> Path {
    let arity = match kind {
        SplineType::Quadratic => 2,
        SplineType::Cubic => 3,
    };
    if control.len() <= arity {
        return control.clone();
    }

    let pts = control.points();
    let mut out = Path::with_capacity(control.len() * 8);
    out.push_point(pts[0]);

    let mut i = 0;
    while i + arity < pts.len() {
        let seg = &pts[i..=i + arity];
        let steps = segment_steps(seg);
        for k in 1..=steps {
            let t = k as f64 / steps as f64;
            out.push_point(match kind {
                SplineType::Quadratic => eval_quadratic(seg[0], seg[1], seg[2], t),
                SplineType::Cubic => eval_cubic(seg[0], seg[1], seg[2], seg[3], t),
            });
        }
        i += arity;
    }
    for p in &pts[i + 1..] {
        out.push_point(*p);
    }
    out
}

/// Flattening step count for one segment, from its control polygon length.
///
/// Vertices land a few units apart: the downstream unit re-sampling sets
/// the final sampling density, and it needs segments of at least a pixel so
/// consecutive scan samples actually advance across destination lanes.
fn segment_steps(seg: &[Point]) -> usize {
    let len: f64 = seg.windows(2).map(|w| w[0].distance_to(w[1])).sum();
    ((len / 3.0).ceil() as usize).max(2)
}

fn eval_quadratic(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let a = p0.lerp(p1, t);
    let b = p1.lerp(p2, t);
    a.lerp(b, t)
}

fn eval_cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let a = p0.lerp(p1, t);
    let b = p1.lerp(p2, t);
    let c = p2.lerp(p3, t);
    let ab = a.lerp(b, t);
    let bc = b.lerp(c, t);
    ab.lerp(bc, t)
}

/// Prepare a flattened guide polyline for scanning.
///
/// Shifts the polyline so the floored top-left of its bounding box is the
/// origin, and re-samples it to one point per unit of traversed Euclidean
/// distance (each segment split into `ceil(length)` equal steps).
///
/// Returns the samples and the placement offset (the original floored
/// top-left).
///
/// # Errors
///
/// Returns [`TransformError::DegenerateCurve`] when the polyline spans zero
/// distance in both axes (all points coincident, or no points at all).
pub(crate) fn prepare_guide(poly: &Path) -> TransformResult<(Path, (i32, i32))> {
    let pts = poly.points();
    let Some(first) = pts.first() else {
        return Err(TransformError::DegenerateCurve);
    };

    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;
    for p in &pts[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if max_x - min_x <= 0.0 && max_y - min_y <= 0.0 {
        return Err(TransformError::DegenerateCurve);
    }

    let ox = min_x.floor();
    let oy = min_y.floor();
    let shifted = poly.offset_by(-ox, -oy);

    let mut samples = Path::with_capacity(shifted.len() * 2);
    samples.push_point(shifted[0]);
    for w in shifted.points().windows(2) {
        let (a, b) = (w[0], w[1]);
        let steps = a.distance_to(b).ceil() as usize;
        for k in 1..=steps {
            samples.push_point(a.lerp(b, k as f64 / steps as f64));
        }
    }

    Ok((samples, (ox as i32, oy as i32)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flatten_short_control_passes_through() {
        let control = Path::from_points(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        let flat = flatten(&control, SplineType::Quadratic);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[1], Point::new(5.0, 5.0));
    }

    #[test]
    fn test_flatten_quadratic_hits_anchors() {
        let control = Path::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
        ]);
        let flat = flatten(&control, SplineType::Quadratic);
        assert!(flat.len() > 4);
        assert_eq!(flat[0], Point::new(0.0, 0.0));
        let last = flat[flat.len() - 1];
        assert_relative_eq!(last.x, 10.0);
        assert_relative_eq!(last.y, 0.0);
        // Curve apex is the Bezier midpoint, half way to the control point
        let apex = flat.iter().fold(0.0f64, |m, p| m.max(p.y));
        assert_relative_eq!(apex, 5.0, epsilon = 0.05);
    }

    #[test]
    fn test_flatten_cubic_trailing_points() {
        // One cubic segment plus one leftover vertex
        let control = Path::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(3.0, 0.0),
            Point::new(9.0, 0.0),
        ]);
        let flat = flatten(&control, SplineType::Cubic);
        assert_eq!(flat[flat.len() - 1], Point::new(9.0, 0.0));
    }

    #[test]
    fn test_prepare_rejects_coincident_points() {
        let poly = Path::from_points(vec![Point::new(3.0, 3.0); 4]);
        assert_eq!(
            prepare_guide(&poly).unwrap_err(),
            TransformError::DegenerateCurve
        );
        assert_eq!(
            prepare_guide(&Path::new()).unwrap_err(),
            TransformError::DegenerateCurve
        );
    }

    #[test]
    fn test_prepare_accepts_flat_curve() {
        // Zero height is fine; only a point-degenerate curve is rejected
        let poly = Path::from_points(vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        let (samples, offset) = prepare_guide(&poly).unwrap();
        assert_eq!(offset, (0, 0));
        // One point per unit of distance, endpoints included
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[3].x, 3.0);
    }

    #[test]
    fn test_prepare_shifts_to_origin() {
        let poly = Path::from_points(vec![Point::new(10.5, -3.5), Point::new(12.5, -1.5)]);
        let (samples, offset) = prepare_guide(&poly).unwrap();
        assert_eq!(offset, (10, -4));
        assert_relative_eq!(samples[0].x, 0.5);
        assert_relative_eq!(samples[0].y, 0.5);
    }

    #[test]
    fn test_prepare_unit_spacing() {
        let poly = Path::from_points(vec![Point::new(0.0, 0.0), Point::new(0.0, 10.0)]);
        let (samples, _) = prepare_guide(&poly).unwrap();
        for w in samples.points().windows(2) {
            assert!(w[0].distance_to(w[1]) <= 1.0 + 1e-9);
        }
    }
}
