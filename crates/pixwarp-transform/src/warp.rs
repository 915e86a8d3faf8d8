//! Spline-guided warps.
//!
//! A guide curve is scanned one sample at a time; each sample claims a
//! destination lane (a column for the vertical warp, a row for the
//! horizontal one) and pulls a strip of the source across it, scaled by the
//! distance between the near and far edges of the warped region. The two
//! warps share one scan routine parameterized by [`ScanAxis`], so fold
//! detection, back-coloring and blending behave identically on both axes.
//!
//! # Fold-over
//!
//! A curve may double back on itself along the scan axis, making several
//! samples claim the same lane. Contributions are alpha-composited in visit
//! order rather than overwritten, and samples moving against the configured
//! fill direction can be recolored with a caller-supplied back color (the
//! color's alpha acts as the opt-in flag) to mark the fold instead of
//! drawing duplicate content.

use crate::error::{TransformError, TransformResult};
use crate::spline::{SplineType, flatten, prepare_guide};
use log::debug;
use pixwarp_core::color::{Color32, blend_over, recolor, signals_recolor};
use pixwarp_core::{Image, Path, Point, sample_bilinear, to_fixed};

/// Which image axis the guide curve runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanAxis {
    /// Guide runs along X; each sample claims a destination column
    Columns,
    /// Guide runs along Y; each sample claims a destination row
    Rows,
}

impl ScanAxis {
    /// Scan-axis coordinate of a guide point (the lane selector).
    #[inline]
    fn lane_coord(self, p: Point) -> f64 {
        match self {
            ScanAxis::Columns => p.x,
            ScanAxis::Rows => p.y,
        }
    }

    /// Cross-axis coordinate of a guide point (the near edge).
    #[inline]
    fn edge_coord(self, p: Point) -> f64 {
        match self {
            ScanAxis::Columns => p.y,
            ScanAxis::Rows => p.x,
        }
    }

    /// Source extent along the scan axis (sliced across the samples).
    #[inline]
    fn scan_len(self, image: &Image) -> u32 {
        match self {
            ScanAxis::Columns => image.width(),
            ScanAxis::Rows => image.height(),
        }
    }

    /// Source extent along the cross axis (stretched between the edges).
    #[inline]
    fn fill_len(self, image: &Image) -> u32 {
        match self {
            ScanAxis::Columns => image.height(),
            ScanAxis::Rows => image.width(),
        }
    }

    /// Destination (x, y) for lane `u`, cross position `j`.
    #[inline]
    fn dest(self, u: i32, j: i32) -> (i32, i32) {
        match self {
            ScanAxis::Columns => (u, j),
            ScanAxis::Rows => (j, u),
        }
    }

    /// Fixed-point source (fx, fy) from the scan-axis and cross-axis parts.
    #[inline]
    fn source(self, scan: i32, cross: i32) -> (i32, i32) {
        match self {
            ScanAxis::Columns => (scan, cross),
            ScanAxis::Rows => (cross, scan),
        }
    }
}

/// Warp the image along a top guide curve.
///
/// The flattened, unit-resampled curve gives each sample a destination
/// column and a top edge; the bottom edge is the curve shifted down by the
/// source height. Returns the placement offset of the warped canvas.
///
/// `back_color` recolors fold-over regions when its alpha is above the
/// opt-in threshold; `reverse_fill` flips both the drawing order and the
/// fill direction, choosing which side of a fold wins.
///
/// # Errors
///
/// - [`TransformError::EmptySource`] if the image has zero area.
/// - [`TransformError::DegenerateCurve`] if the guide spans no distance.
///
/// On any error the image is left unmodified.
pub fn spline_vert(
    image: &mut Image,
    control: &Path,
    kind: SplineType,
    back_color: Color32,
    reverse_fill: bool,
) -> TransformResult<(i32, i32)> {
    spline_warp(image, control, kind, back_color, reverse_fill, ScanAxis::Columns)
}

/// Warp the image along a left guide curve.
///
/// Mirror of [`spline_vert`] with the axes transposed: each sample claims a
/// destination row, and the right edge is the curve shifted right by the
/// source width.
///
/// # Errors
///
/// Same as [`spline_vert`].
pub fn spline_horz(
    image: &mut Image,
    control: &Path,
    kind: SplineType,
    back_color: Color32,
    reverse_fill: bool,
) -> TransformResult<(i32, i32)> {
    spline_warp(image, control, kind, back_color, reverse_fill, ScanAxis::Rows)
}

fn spline_warp(
    image: &mut Image,
    control: &Path,
    kind: SplineType,
    back_color: Color32,
    reverse_fill: bool,
    axis: ScanAxis,
) -> TransformResult<(i32, i32)> {
    if image.is_empty() {
        return Err(TransformError::EmptySource);
    }

    let (guide, offset) = prepare_guide(&flatten(control, kind))?;
    let far = match axis {
        ScanAxis::Columns => guide.offset_by(0.0, image.height() as f64),
        ScanAxis::Rows => guide.offset_by(image.width() as f64, 0.0),
    };

    let (out_w, out_h, scratch) = scan_guide(image, &guide, &far, axis, back_color, reverse_fill);
    debug!(
        "spline warp ({:?}): {}x{} -> {}x{} at ({}, {})",
        axis,
        image.width(),
        image.height(),
        out_w,
        out_h,
        offset.0,
        offset.1
    );

    image.replace(out_w, out_h, scratch);
    Ok(offset)
}

/// Scan the guide samples and render the warped canvas.
///
/// `guide` and `far` are the near and far edges, index-aligned; they are
/// taken separately so an inverted pair (far at or before near) degrades to
/// a collapsed lane instead of failing. The guide is assumed to be shifted
/// to the origin by [`prepare_guide`].
fn scan_guide(
    src: &Image,
    guide: &Path,
    far: &Path,
    axis: ScanAxis,
    back_color: Color32,
    reverse: bool,
) -> (u32, u32, Vec<u32>) {
    let n = guide.len().min(far.len());

    // Canvas: lanes span the guide's reach along the scan axis, the cross
    // extent covers both edges.
    let mut max_lane = 0.0f64;
    let mut max_edge = 0.0f64;
    for i in 0..n {
        max_lane = max_lane.max(axis.lane_coord(guide[i]));
        max_edge = max_edge
            .max(axis.edge_coord(guide[i]))
            .max(axis.edge_coord(far[i]));
    }
    let lanes = max_lane.round() as i32 + 1;
    let cross = (max_edge.ceil() as i32).max(0);
    let (out_w, out_h) = match axis {
        ScanAxis::Columns => (lanes, cross),
        ScanAxis::Rows => (cross, lanes),
    };
    let mut buf = vec![0u32; out_w as usize * out_h as usize];

    let scan_len = axis.scan_len(src);
    let fill_len = axis.fill_len(src);
    let recoloring = signals_recolor(back_color);
    let mut prev_lane: Option<i32> = None;

    for step in 0..n {
        let i = if reverse { n - 1 - step } else { step };
        let lane = axis.lane_coord(guide[i]).round() as i32;

        // Fold detection: a lane change against the fill direction marks the
        // sample as folded over. An unchanged lane peeks one sample ahead in
        // visit order to find which way the curve is heading.
        let mut delta = match prev_lane {
            Some(prev) => lane - prev,
            None => 0,
        };
        if delta == 0 {
            let peek = if reverse {
                i.checked_sub(1)
            } else if i + 1 < n {
                Some(i + 1)
            } else {
                None
            };
            if let Some(pi) = peek {
                delta = axis.lane_coord(guide[pi]).round() as i32 - lane;
            }
        }
        let folded = if reverse { delta > 0 } else { delta < 0 };
        prev_lane = Some(lane);

        if lane < 0 || lane >= lanes {
            continue;
        }

        let near = axis.edge_coord(guide[i]);
        let span = axis.edge_coord(far[i]) - near;
        // Inverted or collapsed edges: the lane maps to a zero-height strip
        let scale = if span > 0.0 {
            fill_len as f64 / span
        } else {
            0.0
        };
        if scale == 0.0 {
            continue;
        }

        let scan_fixed =
            ((i as f64 * scan_len as f64 / n as f64) * 256.0).round() as i32;
        let backing = folded && recoloring;

        for j in 0..cross {
            let cross_fixed = to_fixed((j as f64 - near) * scale);
            let (fx, fy) = axis.source(scan_fixed, cross_fixed);
            let mut c = sample_bilinear(src, fx, fy);
            if c == 0 {
                continue;
            }
            if backing {
                c = recolor(c, back_color);
            }
            let (x, y) = axis.dest(lane, j);
            let idx = y as usize * out_w as usize + x as usize;
            buf[idx] = blend_over(c, buf[idx]);
        }
    }

    (out_w as u32, out_h as u32, buf)
}
