use std::time::{Duration, SystemTime, UNIX_EPOCH};

use canopy_core::frame::ColorImage;
use canopy_core::vegetation::VegetationMeasurement;

/// Saturated mid-green, well inside the vegetation range.
pub const LEAF_GREEN: [u8; 3] = [40, 160, 40];

/// Dry soil brown, outside the vegetation hue range.
pub const SOIL_BROWN: [u8; 3] = [120, 80, 40];

/// Uniform image with every pixel set to `rgb`.
pub fn uniform(h: usize, w: usize, rgb: [u8; 3]) -> ColorImage {
    ColorImage::filled(h, w, rgb)
}

/// Uniform gray image.
pub fn gray(h: usize, w: usize, v: u8) -> ColorImage {
    ColorImage::filled(h, w, [v, v, v])
}

/// Image whose first `green_cols` columns are leaf green and the rest soil.
pub fn canopy_columns(h: usize, w: usize, green_cols: usize) -> ColorImage {
    ColorImage::from_fn(h, w, |_, col| {
        if col < green_cols {
            LEAF_GREEN
        } else {
            SOIL_BROWN
        }
    })
}

/// Horizontal gray ramp from 0 to 255.
pub fn gray_ramp(h: usize, w: usize) -> ColorImage {
    ColorImage::from_fn(h, w, |_, col| {
        let v = (col * 255 / (w - 1).max(1)) as u8;
        [v, v, v]
    })
}

/// Colorful test pattern with varied hue, saturation and brightness.
pub fn pattern(h: usize, w: usize) -> ColorImage {
    ColorImage::from_fn(h, w, |row, col| {
        [
            ((row * 7 + col * 3) % 256) as u8,
            ((row * 5 + col * 11) % 256) as u8,
            ((row * 13 + col) % 256) as u8,
        ]
    })
}

/// Timestamp `secs` seconds after the epoch.
pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Measurement with a fixed timestamp derived from its position.
pub fn measurement(source: &str, fraction: f64, secs: u64) -> VegetationMeasurement {
    VegetationMeasurement {
        source: source.to_string(),
        vegetation_fraction: fraction,
        timestamp: at(secs),
    }
}
