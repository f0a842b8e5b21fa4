use tracing::debug;

use crate::consts::HISTOGRAM_BINS;
use crate::error::{CanopyError, Result};
use crate::frame::ColorImage;

/// Build the 256-entry gamma table: `round(255 * (i/255)^(1/gamma))`.
///
/// gamma > 1.0 brightens midtones, gamma < 1.0 darkens them.
pub fn gamma_lut(gamma: f32) -> Result<[u8; HISTOGRAM_BINS]> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(CanopyError::InvalidParameter(format!(
            "gamma must be positive, got {gamma}"
        )));
    }
    let inv_gamma = 1.0 / gamma as f64;
    let mut lut = [0u8; HISTOGRAM_BINS];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = 255.0 * (i as f64 / 255.0).powf(inv_gamma);
        *entry = v.round().clamp(0.0, 255.0) as u8;
    }
    Ok(lut)
}

/// Remap every channel of every pixel through the gamma table.
pub fn gamma_correct(image: &ColorImage, gamma: f32) -> Result<ColorImage> {
    let lut = gamma_lut(gamma)?;
    debug!(gamma, "Applying gamma correction");
    Ok(ColorImage {
        data: image.data.mapv(|v| lut[v as usize]),
    })
}
