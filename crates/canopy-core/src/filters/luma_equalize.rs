use tracing::debug;

use crate::color::ycrcb::{rgb_to_ycrcb, ycrcb_to_rgb};
use crate::error::Result;
use crate::exposure::EnhancementParameters;
use crate::frame::ColorImage;

use super::clahe::clahe;

/// Equalize local contrast on the luma channel only.
///
/// The image goes through YCrCb; Cr and Cb are carried across untouched so
/// hue is preserved up to conversion rounding.
pub fn equalize_luma(image: &ColorImage, params: &EnhancementParameters) -> Result<ColorImage> {
    image.ensure_non_empty()?;
    let mut planes = rgb_to_ycrcb(image);
    planes.y = clahe(&planes.y, params.clip_limit, params.tile_grid)?;
    debug!(
        clip_limit = params.clip_limit,
        tile_rows = params.tile_grid.0,
        tile_cols = params.tile_grid.1,
        "Equalized luma channel"
    );
    Ok(ycrcb_to_rgb(&planes))
}
