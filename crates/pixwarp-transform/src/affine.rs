//! Affine image transformation.
//!
//! The transform maps the image through an arbitrary affine [`Matrix`]: the
//! output rectangle is the bounding box of the mapped source corners, the
//! matrix is inverted once, and every destination pixel is pulled from its
//! fractional source location with bilinear sampling. The image's storage
//! is replaced wholesale at the end, so transforming an image "into itself"
//! is safe.

use crate::error::TransformResult;
use crate::matrix::Matrix;
use log::debug;
use pixwarp_core::{Image, Point, Rect, sample_bilinear, to_fixed};

/// Transform the image in place through an affine matrix.
///
/// Returns the placement offset: the top-left corner of the transformed
/// bounding box in the source coordinate frame, so callers can reposition
/// the result on a larger canvas. A zero-area image is left untouched and
/// reports offset `(0, 0)`.
///
/// # Errors
///
/// Returns [`TransformError::SingularMatrix`] for a non-invertible matrix;
/// the image is not modified.
///
/// [`TransformError::SingularMatrix`]: crate::TransformError::SingularMatrix
pub fn affine(image: &mut Image, matrix: &Matrix) -> TransformResult<(i32, i32)> {
    if image.is_empty() {
        return Ok((0, 0));
    }

    let w = image.width() as f64;
    let h = image.height() as f64;
    let corners = matrix.transform_points(&[
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]);
    let rect = Rect::bounding(&corners);

    // Invert before allocating anything: a singular matrix must leave the
    // image untouched.
    let inverse = matrix.invert()?;

    let out_w = rect.width().max(0) as u32;
    let out_h = rect.height().max(0) as u32;
    debug!(
        "affine: {}x{} -> {}x{} at ({}, {})",
        image.width(),
        image.height(),
        out_w,
        out_h,
        rect.left,
        rect.top
    );

    let mut scratch = vec![0u32; out_w as usize * out_h as usize];
    for j in 0..out_h {
        let dy = (rect.top + j as i32) as f64;
        let row = j as usize * out_w as usize;
        for i in 0..out_w {
            let dx = (rect.left + i as i32) as f64;
            let src = inverse.transform_point(Point::new(dx, dy));
            scratch[row + i as usize] =
                sample_bilinear(image, to_fixed(src.x), to_fixed(src.y));
        }
    }

    image.replace(out_w, out_h, scratch);
    Ok((rect.left, rect.top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixwarp_core::color::compose_rgb;

    #[test]
    fn test_empty_image_is_noop() {
        let mut img = Image::new(0, 5);
        let offset = affine(&mut img, &Matrix::scaling(3.0, 3.0)).unwrap();
        assert_eq!(offset, (0, 0));
        assert!(img.is_empty());
    }

    #[test]
    fn test_singular_matrix_leaves_image_alone() {
        let mut img = Image::new(4, 4);
        img.fill(compose_rgb(9, 9, 9));
        let before = img.clone();
        let err = affine(&mut img, &Matrix::scaling(0.0, 1.0)).unwrap_err();
        assert_eq!(err, crate::TransformError::SingularMatrix);
        assert_eq!(img, before);
    }

    #[test]
    fn test_translation_moves_offset_not_pixels() {
        let mut img = Image::new(3, 2);
        img.fill(compose_rgb(1, 2, 3));
        let before = img.clone();
        let offset = affine(&mut img, &Matrix::translation(7.0, -4.0)).unwrap();
        assert_eq!(offset, (7, -4));
        assert_eq!(img, before);
    }
}
