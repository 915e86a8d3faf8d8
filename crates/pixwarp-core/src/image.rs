//! The raster image container.
//!
//! # Pixel layout
//!
//! Pixels are packed `0xAARRGGBB` values stored row-major in a contiguous
//! `Vec<u32>`; the linear index of pixel (x, y) is `y * width + x`.
//!
//! # Mutation model
//!
//! An [`Image`] is owned and mutated in place by its caller. Transform
//! operations never write through the live storage while reading it: they
//! compute into a scratch buffer and install it with [`Image::replace`] as
//! their final step, so an image being transformed into itself never
//! observes a partially-written state.
//!
//! Zero-area images are valid; operations on them are no-ops.

use crate::color::Color32;
use crate::error::{Error, Result};

/// A mutable RGBA raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Image {
    /// Create a new image filled with transparent black.
    ///
    /// Zero-sized dimensions are allowed and produce an empty image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Create an image from existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] if `data.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if data.len() != width as usize * height as usize {
            return Err(Error::InvalidGeometry(format!(
                "pixel buffer of {} entries does not match {}x{} image",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Color32 {
        self.data[(y * self.width + x) as usize]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, val: Color32) -> Result<()> {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = val;
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: Color32) {
        self.data[(y * self.width + x) as usize] = val;
    }

    /// Fill the whole image with one color.
    pub fn fill(&mut self, val: Color32) {
        self.data.fill(val);
    }

    /// Replace dimensions and contents in one step.
    ///
    /// Transforms compute their result in a scratch buffer and hand it over
    /// here, so the image switches from the old state to the new one
    /// atomically with respect to its own accessors.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height`.
    pub fn replace(&mut self, width: u32, height: u32, data: Vec<u32>) {
        assert_eq!(
            data.len(),
            width as usize * height as usize,
            "replacement buffer does not match {}x{} image",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.data = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::compose_rgb;

    #[test]
    fn test_new_zeroed() {
        let img = Image::new(4, 3);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert!(!img.is_empty());
        assert!(img.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_zero_area_is_empty() {
        assert!(Image::new(0, 10).is_empty());
        assert!(Image::new(10, 0).is_empty());
        assert_eq!(Image::new(0, 10).data().len(), 0);
    }

    #[test]
    fn test_from_pixels_length_check() {
        assert!(Image::from_pixels(2, 2, vec![0; 4]).is_ok());
        assert!(Image::from_pixels(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let mut img = Image::new(3, 2);
        let c = compose_rgb(10, 20, 30);
        img.set_pixel(2, 1, c).unwrap();
        assert_eq!(img.get_pixel(2, 1), Some(c));
        assert_eq!(img.get_pixel_unchecked(2, 1), c);
        assert_eq!(img.get_pixel(3, 1), None);
        assert!(img.set_pixel(0, 2, c).is_err());
    }

    #[test]
    fn test_replace_swaps_dimensions() {
        let mut img = Image::new(2, 2);
        img.replace(1, 3, vec![7; 3]);
        assert_eq!(img.width(), 1);
        assert_eq!(img.height(), 3);
        assert_eq!(img.get_pixel(0, 2), Some(7));
    }

    #[test]
    #[should_panic(expected = "replacement buffer")]
    fn test_replace_length_mismatch_panics() {
        let mut img = Image::new(2, 2);
        img.replace(2, 2, vec![0; 3]);
    }
}
