use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::ColorImage;

/// BT.601 luma of one RGB pixel, unrounded.
#[inline]
pub fn luma_f32(r: u8, g: u8, b: u8) -> f32 {
    LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
}

/// BT.601 luma of one RGB pixel, rounded and saturated to u8.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    luma_f32(r, g, b).round().clamp(0.0, 255.0) as u8
}

/// Convert a color image to single-channel 8-bit grayscale.
pub fn to_grayscale(image: &ColorImage) -> Array2<u8> {
    let (h, w) = (image.height(), image.width());
    let mut gray = Array2::<u8>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            let [r, g, b] = image.pixel(row, col);
            gray[[row, col]] = luma_u8(r, g, b);
        }
    }
    gray
}
