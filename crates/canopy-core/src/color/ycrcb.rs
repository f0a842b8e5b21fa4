//! 8-bit RGB <-> YCrCb conversion (BT.601, chroma offset 128).

use ndarray::Array2;

use crate::consts::CHROMA_OFFSET;
use crate::frame::ColorImage;

use super::luma::luma_u8;

const CR_SCALE: f32 = 0.713;
const CB_SCALE: f32 = 0.564;
const R_FROM_CR: f32 = 1.403;
const G_FROM_CR: f32 = 0.714;
const G_FROM_CB: f32 = 0.344;
const B_FROM_CB: f32 = 1.773;

/// Separate luma and chroma planes of a color image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YCrCbPlanes {
    pub y: Array2<u8>,
    pub cr: Array2<u8>,
    pub cb: Array2<u8>,
}

#[inline]
fn saturate(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB image into Y, Cr and Cb planes.
pub fn rgb_to_ycrcb(image: &ColorImage) -> YCrCbPlanes {
    let (h, w) = (image.height(), image.width());
    let mut y = Array2::<u8>::zeros((h, w));
    let mut cr = Array2::<u8>::zeros((h, w));
    let mut cb = Array2::<u8>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let [r, g, b] = image.pixel(row, col);
            let luma = luma_u8(r, g, b);
            let lf = luma as f32;
            y[[row, col]] = luma;
            cr[[row, col]] = saturate((r as f32 - lf) * CR_SCALE + CHROMA_OFFSET);
            cb[[row, col]] = saturate((b as f32 - lf) * CB_SCALE + CHROMA_OFFSET);
        }
    }

    YCrCbPlanes { y, cr, cb }
}

/// Convert Y, Cr and Cb planes back into an RGB image.
pub fn ycrcb_to_rgb(planes: &YCrCbPlanes) -> ColorImage {
    let (h, w) = planes.y.dim();
    ColorImage::from_fn(h, w, |row, col| {
        let y = planes.y[[row, col]] as f32;
        let cr = planes.cr[[row, col]] as f32 - CHROMA_OFFSET;
        let cb = planes.cb[[row, col]] as f32 - CHROMA_OFFSET;
        [
            saturate(y + R_FROM_CR * cr),
            saturate(y - G_FROM_CR * cr - G_FROM_CB * cb),
            saturate(y + B_FROM_CB * cb),
        ]
    })
}
