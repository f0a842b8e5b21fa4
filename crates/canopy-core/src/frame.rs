use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{CanopyError, Result};

/// An 8-bit color photograph.
/// Samples are u8, shape = (height, width, 3), channel order R, G, B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorImage {
    /// Pixel data, row-major.
    pub data: Array3<u8>,
}

impl ColorImage {
    /// Wrap an existing `(height, width, 3)` array.
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let channels = data.dim().2;
        if channels != COLOR_CHANNEL_COUNT {
            return Err(CanopyError::InvalidImage(format!(
                "expected {COLOR_CHANNEL_COUNT} channels, got {channels}"
            )));
        }
        Ok(Self { data })
    }

    /// Image of the given size with every pixel set to `rgb`.
    pub fn filled(height: usize, width: usize, rgb: [u8; 3]) -> Self {
        Self::from_fn(height, width, |_, _| rgb)
    }

    /// Build an image by evaluating `f(row, col)` for every pixel.
    pub fn from_fn<F>(height: usize, width: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> [u8; 3],
    {
        let mut data = Array3::<u8>::zeros((height, width, COLOR_CHANNEL_COUNT));
        for row in 0..height {
            for col in 0..width {
                let px = f(row, col);
                for (ch, &v) in px.iter().enumerate() {
                    data[[row, col, ch]] = v;
                }
            }
        }
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// RGB triple at (row, col).
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    /// Fail with `InvalidImage` unless the image holds at least one pixel.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.pixel_count() == 0 {
            return Err(CanopyError::InvalidImage(format!(
                "image has no pixels ({}x{})",
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }
}
