//! 3x3 homogeneous-coordinate matrix algebra.
//!
//! A [`Matrix`] represents a 2D affine or projective transform in
//! homogeneous coordinates. The convention is column vectors: applying a
//! matrix to the point `(x, y, 1)` yields a homogeneous triple whose first
//! two components are divided by the third to recover Cartesian
//! coordinates.
//!
//! ```text
//! | m00 m01 m02 |   | x |   | X |
//! | m10 m11 m12 | * | y | = | Y |      (x', y') = (X / W, Y / W)
//! | m20 m21 m22 |   | 1 |   | W |
//! ```
//!
//! The [adjugate](Matrix::adjugate) (transpose of the cofactor matrix) is
//! provided separately from inversion: for projective solves only the
//! direction of the mapped ray matters, so the adjugate can stand in for
//! the inverse without ever dividing by the determinant.

use crate::error::{TransformError, TransformResult};
use pixwarp_core::Point;

/// Determinant magnitudes below this are treated as singular.
const DET_EPSILON: f64 = 1e-12;

/// An immutable 3x3 matrix of doubles in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    m: [[f64; 3]; 3],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Create from row-major elements.
    pub const fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// A pure translation by (dx, dy).
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: [[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]],
        }
    }

    /// A scale about the origin.
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// A rotation about the origin by `angle` radians (counter-clockwise).
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    /// Matrix product `self * other` (apply `other` first).
    pub fn mul(&self, other: &Matrix) -> Matrix {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self.m[r][0] * other.m[0][c]
                    + self.m[r][1] * other.m[1][c]
                    + self.m[r][2] * other.m[2][c];
            }
        }
        Matrix { m: out }
    }

    /// The determinant.
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// The adjugate (transpose of the cofactor matrix).
    ///
    /// Satisfies `self * adjugate == determinant * identity`, so it acts as
    /// an unnormalized inverse even for matrices too ill-conditioned to
    /// invert outright.
    pub fn adjugate(&self) -> Matrix {
        let m = &self.m;
        Matrix {
            m: [
                [
                    m[1][1] * m[2][2] - m[1][2] * m[2][1],
                    m[0][2] * m[2][1] - m[0][1] * m[2][2],
                    m[0][1] * m[1][2] - m[0][2] * m[1][1],
                ],
                [
                    m[1][2] * m[2][0] - m[1][0] * m[2][2],
                    m[0][0] * m[2][2] - m[0][2] * m[2][0],
                    m[0][2] * m[1][0] - m[0][0] * m[1][2],
                ],
                [
                    m[1][0] * m[2][1] - m[1][1] * m[2][0],
                    m[0][1] * m[2][0] - m[0][0] * m[2][1],
                    m[0][0] * m[1][1] - m[0][1] * m[1][0],
                ],
            ],
        }
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] when the determinant is
    /// too close to zero for a meaningful inverse.
    pub fn invert(&self) -> TransformResult<Matrix> {
        let det = self.determinant();
        if det.abs() < DET_EPSILON {
            return Err(TransformError::SingularMatrix);
        }
        let adj = self.adjugate();
        let inv_det = 1.0 / det;
        let mut out = adj.m;
        for row in &mut out {
            for v in row {
                *v *= inv_det;
            }
        }
        Ok(Matrix { m: out })
    }

    /// Apply to `(x, y, 1)` without normalizing.
    ///
    /// Returns the raw homogeneous triple; callers decide how to handle a
    /// zero third component.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64, f64) {
        let m = &self.m;
        (
            m[0][0] * x + m[0][1] * y + m[0][2],
            m[1][0] * x + m[1][1] * y + m[1][2],
            m[2][0] * x + m[2][1] * y + m[2][2],
        )
    }

    /// Apply to a point and normalize.
    ///
    /// For affine matrices the homogeneous component is 1 and this is a
    /// plain linear map. Callers applying projective matrices near the
    /// horizon should use [`Matrix::apply`] and handle the denominator
    /// themselves.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        let (x, y, w) = self.apply(p.x, p.y);
        Point::new(x / w, y / w)
    }

    /// Apply to a batch of points, normalizing each.
    pub fn transform_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.transform_point(p)).collect()
    }
}
