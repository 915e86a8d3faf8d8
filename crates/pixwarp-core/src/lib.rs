//! pixwarp-core - Basic data structures for raster warping
//!
//! This crate provides the fundamental types used throughout the pixwarp
//! library:
//!
//! - [`Image`] - Mutable RGBA raster image (packed `0xAARRGGBB` pixels)
//! - [`Rect`] - Axis-aligned integer rectangle
//! - [`Point`] / [`Path`] - Double-precision points and point sequences
//! - [`color`] - Channel helpers, alpha compositing and recoloring
//! - [`sample`] - Weighted (bilinear) sampling at 1/256-pixel fixed point

pub mod color;
pub mod error;
pub mod image;
pub mod path;
pub mod rect;
pub mod sample;

pub use color::Color32;
pub use error::{Error, Result};
pub use image::Image;
pub use path::{Path, Point};
pub use rect::Rect;
pub use sample::{FIXED_BITS, FIXED_ONE, sample_bilinear, to_fixed};
