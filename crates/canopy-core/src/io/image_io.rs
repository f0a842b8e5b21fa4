use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, RgbImage};
use ndarray::{Array2, Array3};

use crate::consts::{COLOR_CHANNEL_COUNT, SUPPORTED_EXTENSIONS};
use crate::error::{CanopyError, Result};
use crate::frame::ColorImage;

/// Whether the path has one of the accepted photograph extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Decode an in-memory encoded image into an 8-bit RGB image.
pub fn decode_image(bytes: &[u8]) -> Result<ColorImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| CanopyError::InvalidImage(format!("failed to decode image: {e}")))?;
    from_rgb8(img.to_rgb8())
}

/// Load an image file into an 8-bit RGB image.
///
/// Decode failures and zero-size images are reported as `InvalidImage`.
pub fn load_image(path: &Path) -> Result<ColorImage> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => CanopyError::Io(io),
        other => CanopyError::InvalidImage(format!("{}: {other}", path.display())),
    })?;
    from_rgb8(img.to_rgb8())
}

fn from_rgb8(rgb: RgbImage) -> Result<ColorImage> {
    let (w, h) = rgb.dimensions();
    let data = Array3::from_shape_vec(
        (h as usize, w as usize, COLOR_CHANNEL_COUNT),
        rgb.into_raw(),
    )
    .map_err(|e| CanopyError::InvalidImage(e.to_string()))?;
    let image = ColorImage::new(data)?;
    image.ensure_non_empty()?;
    Ok(image)
}

fn to_rgb8(image: &ColorImage) -> Result<RgbImage> {
    let raw: Vec<u8> = image.data.iter().copied().collect();
    RgbImage::from_raw(image.width() as u32, image.height() as u32, raw).ok_or_else(|| {
        CanopyError::InvalidImage(format!(
            "buffer does not match {}x{}",
            image.width(),
            image.height()
        ))
    })
}

fn format_for(path: &Path) -> ImageFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        Some("tiff" | "tif") => ImageFormat::Tiff,
        _ => ImageFormat::Png,
    }
}

/// Save a color image, choosing format from file extension (PNG by default).
pub fn save_image(image: &ColorImage, path: &Path) -> Result<()> {
    let img = to_rgb8(image)?;
    img.save_with_format(path, format_for(path))?;
    Ok(())
}

/// Save a vegetation mask as 8-bit grayscale PNG (255 = vegetation).
pub fn save_mask(mask: &Array2<bool>, path: &Path) -> Result<()> {
    let (h, w) = mask.dim();
    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = if mask[[row, col]] { 255 } else { 0 };
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
