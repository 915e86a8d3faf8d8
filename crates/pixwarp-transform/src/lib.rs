//! pixwarp-transform - Geometric raster warps
//!
//! This crate implements the pixwarp transform engine:
//!
//! - Affine transformation through an arbitrary 3x3 [`Matrix`]
//! - Projective (quad-to-quad) transformation with perspective-correct
//!   resampling and per-side output [`Margins`]
//! - Spline-guided vertical and horizontal warps with fold-over detection
//!   and opt-in back-coloring
//!
//! All transforms mutate the caller's [`Image`](pixwarp_core::Image) in
//! place, computing into a scratch buffer first and swapping it in as the
//! final step. Degenerate input geometry is reported as a
//! [`TransformError`] before any mutation; numeric edge cases inside a
//! warp are clamped toward "out of frame" and resolve to transparency.

pub mod affine;
mod error;
pub mod matrix;
pub mod projective;
pub mod spline;
pub mod warp;

pub use affine::affine;
pub use error::{TransformError, TransformResult};
pub use matrix::Matrix;
pub use projective::{Margins, projective};
pub use spline::{SplineType, flatten};
pub use warp::{spline_horz, spline_vert};
