/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum image count to use image-level Rayon parallelism in a series.
pub const PARALLEL_IMAGE_THRESHOLD: usize = 2;

/// Number of channels in a color image (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Median brightness below which an image is underexposed.
pub const UNDEREXPOSED_BELOW: f64 = 64.0;

/// Median brightness below which an image is moderately dark.
pub const MODERATELY_DARK_BELOW: f64 = 128.0;

/// Median brightness below which an image is normally exposed; at or above is overexposed.
pub const NORMAL_BELOW: f64 = 192.0;

/// Tile grid (rows, cols) used by adaptive equalization for every exposure bucket.
pub const DEFAULT_TILE_GRID: (usize, usize) = (8, 8);

/// Number of bins in an 8-bit histogram.
pub const HISTOGRAM_BINS: usize = 256;

/// Offset applied to the Cr/Cb channels of 8-bit YCrCb.
pub const CHROMA_OFFSET: f32 = 128.0;

/// Lowest hue (0..180 scale, inclusive) classified as vegetation.
pub const VEGETATION_HUE_MIN: u8 = 35;

/// Highest hue (0..180 scale, inclusive) classified as vegetation.
pub const VEGETATION_HUE_MAX: u8 = 85;

/// Minimum saturation (0..255) for a pixel to count as vegetation.
pub const VEGETATION_SATURATION_MIN: u8 = 40;

/// Minimum value/brightness (0..255) for a pixel to count as vegetation.
pub const VEGETATION_VALUE_MIN: u8 = 40;

/// Minimum number of measurements needed to compute a growth series.
pub const MIN_SERIES_LEN: usize = 2;

/// File extensions accepted as input photographs.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
