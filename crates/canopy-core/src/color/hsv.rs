/// Convert one RGB pixel to 8-bit HSV.
///
/// Hue is on a 0..180 scale (degrees / 2), saturation and value on 0..255.
/// Achromatic pixels (max == min) have hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = max - min;

    let s = if max > 0.0 {
        (255.0 * diff / max).round()
    } else {
        0.0
    };

    let hue_degrees = if diff == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / diff
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    let hue_degrees = if hue_degrees < 0.0 {
        hue_degrees + 360.0
    } else {
        hue_degrees
    };

    // 359.x degrees rounds to 180, which wraps back to 0.
    let mut h = (hue_degrees / 2.0).round();
    if h >= 180.0 {
        h -= 180.0;
    }

    (h as u8, s as u8, max as u8)
}
