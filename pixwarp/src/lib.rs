//! pixwarp - Geometric raster-image warping
//!
//! pixwarp resamples RGBA raster images through geometric transforms:
//!
//! - Affine maps given as 3x3 homogeneous matrices
//! - Projective maps given as four-point quad-to-quad correspondences
//! - Spline-guided warps that bend an image along a guide curve, with
//!   fold-over detection and opt-in back-coloring
//!
//! Resampling is bilinear at 1/256-pixel fixed-point precision, and warped
//! contributions that overlap are alpha-composited rather than overwritten.
//!
//! # Example
//!
//! ```
//! use pixwarp::{Image, transform};
//!
//! let mut img = Image::new(64, 48);
//! let rotate = transform::Matrix::rotation(0.3);
//! let offset = transform::affine(&mut img, &rotate).unwrap();
//! assert!(offset.0 < 0 || offset.1 < 0 || offset == (0, 0));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixwarp_core::*;

// Re-export the transform engine as a module
pub use pixwarp_transform as transform;
