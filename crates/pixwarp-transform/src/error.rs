//! Error types for pixwarp-transform

use thiserror::Error;

/// Errors that can occur during geometric warps
///
/// All of these describe degenerate input geometry and are reported before
/// the target image is touched; numeric edge cases inside a warp (zero
/// homogeneous denominator, collapsed scale) are clamped, not raised.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// Source image has zero area
    #[error("empty source image")]
    EmptySource,

    /// Singular (non-invertible) transformation matrix
    #[error("singular transformation matrix")]
    SingularMatrix,

    /// Destination quadrilateral is not strictly convex
    #[error("destination quadrilateral is not convex")]
    NonConvexQuad,

    /// Guide curve spans no distance in either axis
    #[error("degenerate guide curve")]
    DegenerateCurve,

    /// Computed destination rectangle has zero area
    #[error("empty destination rectangle")]
    EmptyDestination,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
