//! Hue/saturation/value threshold classifier for plant pixels.

use std::time::SystemTime;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::hsv::rgb_to_hsv;
use crate::consts::{
    VEGETATION_HUE_MAX, VEGETATION_HUE_MIN, VEGETATION_SATURATION_MIN, VEGETATION_VALUE_MIN,
};
use crate::error::Result;
use crate::frame::ColorImage;

/// Vegetation coverage of one photograph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VegetationMeasurement {
    /// Caller-supplied identifier, usually the file name.
    pub source: String,
    /// Percentage of vegetation pixels, in [0, 100].
    pub vegetation_fraction: f64,
    pub timestamp: SystemTime,
}

/// Whether an 8-bit HSV triple falls inside the vegetation range.
#[inline]
pub fn is_vegetation_hsv(h: u8, s: u8, v: u8) -> bool {
    (VEGETATION_HUE_MIN..=VEGETATION_HUE_MAX).contains(&h)
        && s >= VEGETATION_SATURATION_MIN
        && v >= VEGETATION_VALUE_MIN
}

/// Whether an RGB pixel is classified as vegetation.
#[inline]
pub fn is_vegetation(r: u8, g: u8, b: u8) -> bool {
    let (h, s, v) = rgb_to_hsv(r, g, b);
    is_vegetation_hsv(h, s, v)
}

/// Per-pixel vegetation mask, `true` where the pixel is plant matter.
pub fn vegetation_mask(image: &ColorImage) -> Array2<bool> {
    Array2::from_shape_fn((image.height(), image.width()), |(row, col)| {
        let [r, g, b] = image.pixel(row, col);
        is_vegetation(r, g, b)
    })
}

/// Percentage of pixels classified as vegetation.
pub fn vegetation_fraction(image: &ColorImage) -> Result<f64> {
    image.ensure_non_empty()?;
    let mask = vegetation_mask(image);
    let count = mask.iter().filter(|&&m| m).count();
    Ok(100.0 * count as f64 / mask.len() as f64)
}

/// Measure an image and wrap the result with its identifier and timestamp.
pub fn measure(
    image: &ColorImage,
    source: impl Into<String>,
    timestamp: SystemTime,
) -> Result<VegetationMeasurement> {
    let source = source.into();
    let vegetation_fraction = vegetation_fraction(image)?;
    info!(source = %source, vegetation_fraction, "Vegetation fraction computed");
    Ok(VegetationMeasurement {
        source,
        vegetation_fraction,
        timestamp,
    })
}
