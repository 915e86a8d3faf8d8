//! Affine regression test - identity, bounds and resampling properties
//!
//! Tests that:
//!   1. The identity matrix preserves dimensions, contents and offset
//!   2. The reported offset and output size equal the bounding box of the
//!      mapped source corners, rounded outward
//!   3. Pure scaling resamples content onto the scaled grid
//!   4. A singular matrix is rejected without touching the image

use pixwarp_core::color::compose_rgba;
use pixwarp_core::{Image, Point, Rect};
use pixwarp_transform::{Matrix, TransformError, affine};

/// Small gradient image with a distinct value at every pixel
fn gradient(w: u32, h: u32) -> Image {
    let mut img = Image::new(w, h);
    for y in 0..h {
        for x in 0..w {
            img.set_pixel(x, y, compose_rgba((x * 16) as u8, (y * 16) as u8, (x + y) as u8, 255))
                .unwrap();
        }
    }
    img
}

#[test]
fn identity_preserves_image() {
    let mut img = gradient(7, 5);
    let before = img.clone();

    let offset = affine(&mut img, &Matrix::identity()).unwrap();

    assert_eq!(offset, (0, 0));
    assert_eq!(img.width(), 7);
    assert_eq!(img.height(), 5);
    assert_eq!(img, before);
}

#[test]
fn offset_and_size_match_mapped_corners() {
    let mut img = gradient(10, 6);
    let matrix = Matrix::rotation(0.5).mul(&Matrix::translation(-3.0, 2.0));

    let corners = [
        matrix.transform_point(Point::new(0.0, 0.0)),
        matrix.transform_point(Point::new(10.0, 0.0)),
        matrix.transform_point(Point::new(10.0, 6.0)),
        matrix.transform_point(Point::new(0.0, 6.0)),
    ];
    let expected = Rect::bounding(&corners);

    let offset = affine(&mut img, &matrix).unwrap();

    assert_eq!(offset, (expected.left, expected.top));
    assert_eq!(img.width() as i32, expected.width());
    assert_eq!(img.height() as i32, expected.height());
}

#[test]
fn scaling_doubles_grid() {
    let mut img = gradient(4, 4);
    let src = img.clone();

    let offset = affine(&mut img, &Matrix::scaling(2.0, 2.0)).unwrap();

    assert_eq!(offset, (0, 0));
    assert_eq!((img.width(), img.height()), (8, 8));
    // Even destination pixels land exactly on source pixels
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(
                img.get_pixel(2 * x, 2 * y),
                src.get_pixel(x, y),
                "pixel ({x}, {y})"
            );
        }
    }
}

#[test]
fn singular_matrix_is_rejected() {
    let mut img = gradient(4, 4);
    let before = img.clone();

    let err = affine(&mut img, &Matrix::scaling(1.0, 0.0)).unwrap_err();

    assert_eq!(err, TransformError::SingularMatrix);
    assert_eq!(img, before);
}

#[test]
fn empty_image_is_untouched() {
    let mut img = Image::new(0, 0);
    let offset = affine(&mut img, &Matrix::rotation(1.0)).unwrap();
    assert_eq!(offset, (0, 0));
    assert!(img.is_empty());
}
