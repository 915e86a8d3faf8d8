//! Projective (quad-to-quad) image transformation.
//!
//! The transform maps an arbitrary convex quadrilateral of the source onto
//! an arbitrary convex quadrilateral of the destination with
//! perspective-correct resampling. The homography is solved with the
//! basis-to-points construction: each quad yields a 3x3 basis matrix
//! carrying the canonical projective frame onto its four corners, and the
//! destination-to-source map composes one basis with the adjugate of the
//! other. No explicit inversion is needed, so the solve cannot divide by
//! zero.

use crate::error::{TransformError, TransformResult};
use crate::matrix::Matrix;
use log::debug;
use pixwarp_core::sample::COORD_SENTINEL;
use pixwarp_core::{FIXED_ONE, Image, Point, Rect, sample_bilinear};

/// Per-side margins around the projected destination region.
///
/// Positive values reserve extra destination canvas on that side; negative
/// values trim it. Margins are only meaningful when the source quad lies
/// inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    /// Create margins with the given per-side values.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// No margin on any side.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Transform the image in place, mapping `src_quad` onto `dst_quad`.
///
/// The output canvas is the bounding box of `dst_quad` inflated by
/// `margins`; the image's contents and dimensions are replaced with the
/// resampled result.
///
/// # Errors
///
/// - [`TransformError::EmptySource`] if the image has zero area.
/// - [`TransformError::NonConvexQuad`] if `dst_quad` is not strictly convex.
/// - [`TransformError::EmptyDestination`] if the margin-adjusted output
///   rect has no area.
///
/// On any error the image is left unmodified.
pub fn projective(
    image: &mut Image,
    src_quad: &[Point; 4],
    dst_quad: &[Point; 4],
    margins: Margins,
) -> TransformResult<()> {
    if image.is_empty() {
        return Err(TransformError::EmptySource);
    }
    if !is_convex(dst_quad) {
        return Err(TransformError::NonConvexQuad);
    }

    let rect = Rect::bounding(dst_quad).inflate(
        margins.left,
        margins.top,
        margins.right,
        margins.bottom,
    );
    if rect.is_empty() {
        return Err(TransformError::EmptyDestination);
    }

    // Destination -> source, taking local scratch coordinates through the
    // global destination frame and both quad bases.
    let projection = quad_basis(src_quad)
        .mul(&quad_basis(dst_quad).adjugate())
        .mul(&Matrix::translation(rect.left as f64, rect.top as f64));

    let out_w = rect.width() as u32;
    let out_h = rect.height() as u32;
    debug!(
        "projective: {}x{} -> {}x{} at ({}, {})",
        image.width(),
        image.height(),
        out_w,
        out_h,
        rect.left,
        rect.top
    );

    let mut scratch = vec![0u32; out_w as usize * out_h as usize];
    for j in 0..out_h {
        let row = j as usize * out_w as usize;
        for i in 0..out_w {
            let (x, y, z) = projection.apply(i as f64, j as f64);
            let (fx, fy) = project_fixed(x, y, z);
            scratch[row + i as usize] = sample_bilinear(image, fx, fy);
        }
    }

    image.replace(out_w, out_h, scratch);
    Ok(())
}

/// Normalize a homogeneous triple to fixed-point source coordinates.
///
/// A zero denominator maps to the sentinel extreme with the sign of the
/// unnormalized numerator ("infinitely far out of frame"), as do finite
/// quotients too large for the safe fixed-point range.
fn project_fixed(x: f64, y: f64, z: f64) -> (i32, i32) {
    if z == 0.0 {
        return (sentinel_for(x), sentinel_for(y));
    }
    let scale = FIXED_ONE as f64 / z;
    (clamp_fixed(x * scale), clamp_fixed(y * scale))
}

#[inline]
fn sentinel_for(numerator: f64) -> i32 {
    if numerator < 0.0 {
        -COORD_SENTINEL
    } else {
        COORD_SENTINEL
    }
}

#[inline]
fn clamp_fixed(scaled: f64) -> i32 {
    let rounded = scaled.round();
    if !(rounded.abs() < COORD_SENTINEL as f64) {
        return sentinel_for(rounded);
    }
    rounded as i32
}

/// Basis matrix carrying the canonical projective frame onto the quad.
///
/// The columns are the first three corners scaled by the homogeneous
/// weights obtained from pushing the fourth corner through the adjugate;
/// the resulting matrix maps `e0`, `e1`, `e2` onto the first three corners
/// and `e0 + e1 + e2` onto the fourth.
fn quad_basis(quad: &[Point; 4]) -> Matrix {
    let p = Matrix::from_rows([
        [quad[0].x, quad[1].x, quad[2].x],
        [quad[0].y, quad[1].y, quad[2].y],
        [1.0, 1.0, 1.0],
    ]);
    let (w0, w1, w2) = p.adjugate().apply(quad[3].x, quad[3].y);
    Matrix::from_rows([
        [quad[0].x * w0, quad[1].x * w1, quad[2].x * w2],
        [quad[0].y * w0, quad[1].y * w1, quad[2].y * w2],
        [w0, w1, w2],
    ])
}

/// Test that the four corners form a strictly convex quadrilateral.
///
/// Every pair of consecutive edges must turn the same way; a zero cross
/// product (collinear corners) also fails.
fn is_convex(quad: &[Point; 4]) -> bool {
    let mut sign = 0.0f64;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let c = quad[(i + 2) % 4];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross == 0.0 {
            return false;
        }
        if sign == 0.0 {
            sign = cross;
        } else if sign * cross < 0.0 {
            return false;
        }
    }
    true
}
