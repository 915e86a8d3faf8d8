//! Color channel helpers and alpha compositing for packed 32-bit pixels.
//!
//! # Pixel format
//!
//! Pixels are stored as `0xAARRGGBB` (alpha in the MSB, blue in the LSB).
//! All compositing here operates on straight (non-premultiplied) alpha.
//!
//! The alpha byte doubles as an opt-in flag for recoloring operations:
//! a color with alpha of 2 or less never recolors (see [`signals_recolor`]).

/// Packed 32-bit color, `0xAARRGGBB`.
pub type Color32 = u32;

/// Shift amounts for extracting color channels
pub const ALPHA_SHIFT: u32 = 24;
pub const RED_SHIFT: u32 = 16;
pub const GREEN_SHIFT: u32 = 8;
pub const BLUE_SHIFT: u32 = 0;

/// Alpha values at or below this never trigger recoloring.
pub const RECOLOR_ALPHA_MIN: u8 = 2;

/// Extract the alpha component.
#[inline]
pub fn alpha(pixel: Color32) -> u8 {
    ((pixel >> ALPHA_SHIFT) & 0xff) as u8
}

/// Extract the red component.
#[inline]
pub fn red(pixel: Color32) -> u8 {
    ((pixel >> RED_SHIFT) & 0xff) as u8
}

/// Extract the green component.
#[inline]
pub fn green(pixel: Color32) -> u8 {
    ((pixel >> GREEN_SHIFT) & 0xff) as u8
}

/// Extract the blue component.
#[inline]
pub fn blue(pixel: Color32) -> u8 {
    ((pixel >> BLUE_SHIFT) & 0xff) as u8
}

/// Compose a fully opaque color from RGB components.
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> Color32 {
    compose_rgba(r, g, b, 255)
}

/// Compose a color from RGBA components.
#[inline]
pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> Color32 {
    ((a as u32) << ALPHA_SHIFT)
        | ((r as u32) << RED_SHIFT)
        | ((g as u32) << GREEN_SHIFT)
        | ((b as u32) << BLUE_SHIFT)
}

/// Check whether a color is fully opaque.
#[inline]
pub fn is_opaque(pixel: Color32) -> bool {
    alpha(pixel) == 255
}

/// Check whether a color opts in to recoloring.
///
/// Only the alpha byte is inspected; alpha of [`RECOLOR_ALPHA_MIN`] or
/// below means "no recolor".
#[inline]
pub fn signals_recolor(pixel: Color32) -> bool {
    alpha(pixel) > RECOLOR_ALPHA_MIN
}

/// Replace the RGB of `src` with the RGB of `back`, preserving `src`'s alpha.
///
/// This is the back-coloring primitive used to mark fold-over regions.
#[inline]
pub fn recolor(src: Color32, back: Color32) -> Color32 {
    (src & 0xff00_0000) | (back & 0x00ff_ffff)
}

/// Divide by 255 with rounding, for products of two 8-bit values.
#[inline]
fn div255(v: u32) -> u32 {
    (v + 127) / 255
}

/// Composite `src` over `dst` with straight alpha.
///
/// Fully transparent `src` returns `dst` unchanged; fully opaque `src`
/// returns `src`. The result alpha is `sa + da * (255 - sa) / 255` and each
/// color channel is the alpha-weighted average of the two inputs.
pub fn blend_over(src: Color32, dst: Color32) -> Color32 {
    let sa = alpha(src) as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = alpha(dst) as u32;
    // Contribution of dst that shows through src
    let db = div255(da * (255 - sa));
    let out_a = sa + db;
    if out_a == 0 {
        return 0;
    }

    let channel = |s: u8, d: u8| -> u32 {
        let acc = s as u32 * sa + d as u32 * db;
        (acc + out_a / 2) / out_a
    };

    compose_rgba(
        channel(red(src), red(dst)) as u8,
        channel(green(src), green(dst)) as u8,
        channel(blue(src), blue(dst)) as u8,
        out_a as u8,
    )
}

/// Composite `src` over `dst`, treating `dst` as an opaque backdrop.
///
/// Each channel is linearly interpolated by `src`'s alpha and the result is
/// always fully opaque.
pub fn blend_to_opaque(src: Color32, dst: Color32) -> Color32 {
    let sa = alpha(src) as u32;
    if sa == 255 {
        return src | 0xff00_0000;
    }
    if sa == 0 {
        return dst | 0xff00_0000;
    }

    let channel = |s: u8, d: u8| -> u8 { div255(s as u32 * sa + d as u32 * (255 - sa)) as u8 };

    compose_rgb(
        channel(red(src), red(dst)),
        channel(green(src), green(dst)),
        channel(blue(src), blue(dst)),
    )
}
