//! Brightness classification and the per-bucket enhancement table.

mod params;

pub use params::{parameters_for, EnhancementParameters};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::luma::to_grayscale;
use crate::consts::{HISTOGRAM_BINS, MODERATELY_DARK_BELOW, NORMAL_BELOW, UNDEREXPOSED_BELOW};
use crate::error::Result;
use crate::frame::ColorImage;

/// Discrete exposure category derived from median brightness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureBucket {
    Underexposed,
    ModeratelyDark,
    Normal,
    Overexposed,
}

impl ExposureBucket {
    pub const ALL: [ExposureBucket; 4] = [
        Self::Underexposed,
        Self::ModeratelyDark,
        Self::Normal,
        Self::Overexposed,
    ];

    /// Map a brightness value on [0, 255] to its bucket.
    pub fn from_brightness(brightness: f64) -> Self {
        if brightness < UNDEREXPOSED_BELOW {
            Self::Underexposed
        } else if brightness < MODERATELY_DARK_BELOW {
            Self::ModeratelyDark
        } else if brightness < NORMAL_BELOW {
            Self::Normal
        } else {
            Self::Overexposed
        }
    }

    /// Static enhancement parameters for this bucket.
    pub fn parameters(self) -> &'static EnhancementParameters {
        parameters_for(self)
    }
}

impl std::fmt::Display for ExposureBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underexposed => write!(f, "Underexposed"),
            Self::ModeratelyDark => write!(f, "Moderately Dark"),
            Self::Normal => write!(f, "Normal"),
            Self::Overexposed => write!(f, "Overexposed"),
        }
    }
}

/// Brightness summary of an image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrightnessClass {
    pub median: f64,
    pub bucket: ExposureBucket,
}

/// Median of an 8-bit plane. Even counts average the two middle samples.
pub fn median_u8(plane: &Array2<u8>) -> Option<f64> {
    let n = plane.len();
    if n == 0 {
        return None;
    }
    let mut histogram = [0usize; HISTOGRAM_BINS];
    for &v in plane.iter() {
        histogram[v as usize] += 1;
    }

    let nth = |k: usize| -> u8 {
        let mut seen = 0usize;
        for (value, &count) in histogram.iter().enumerate() {
            seen += count;
            if seen > k {
                return value as u8;
            }
        }
        u8::MAX
    };

    if n % 2 == 1 {
        Some(nth(n / 2) as f64)
    } else {
        let lo = nth(n / 2 - 1) as f64;
        let hi = nth(n / 2) as f64;
        Some((lo + hi) / 2.0)
    }
}

/// Median grayscale intensity of a color image.
pub fn median_brightness(image: &ColorImage) -> Result<f64> {
    image.ensure_non_empty()?;
    let gray = to_grayscale(image);
    // ensure_non_empty guarantees at least one sample.
    Ok(median_u8(&gray).unwrap_or_default())
}

/// Compute median brightness and its exposure bucket.
pub fn classify_exposure(image: &ColorImage) -> Result<BrightnessClass> {
    let median = median_brightness(image)?;
    let bucket = ExposureBucket::from_brightness(median);
    info!(median, bucket = %bucket, "Brightness computed");
    Ok(BrightnessClass { median, bucket })
}
