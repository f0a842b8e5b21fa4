//! Contrast-limited adaptive histogram equalization on a single 8-bit plane.

use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{HISTOGRAM_BINS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{CanopyError, Result};

type Lut = [u8; HISTOGRAM_BINS];

/// Equalize `plane` with a `grid = (rows, cols)` tile layout.
///
/// Each tile gets its own clipped-histogram lookup table; output pixels
/// bilinearly blend the tables of the four nearest tile centres. When the
/// plane does not divide evenly into tiles, statistics are gathered on a
/// reflect-101 extended copy, but only the original extent is written.
pub fn clahe(plane: &Array2<u8>, clip_limit: f32, grid: (usize, usize)) -> Result<Array2<u8>> {
    validate_clahe_params(clip_limit, grid)?;
    let (h, w) = plane.dim();
    if h == 0 || w == 0 {
        return Err(CanopyError::InvalidImage(format!(
            "cannot equalize an empty {w}x{h} plane"
        )));
    }

    let (grid_y, grid_x) = grid;
    let source = extend_reflect101(plane, grid_y, grid_x);
    let (ext_h, ext_w) = source.dim();
    let tile_h = ext_h / grid_y;
    let tile_w = ext_w / grid_x;

    let luts = compute_tile_luts(&source, grid_y, grid_x, tile_h, tile_w, clip_limit);
    debug!(
        width = w,
        height = h,
        tile_w,
        tile_h,
        clip_limit,
        "Computed per-tile equalization tables"
    );

    Ok(interpolate(plane, &luts, grid_y, grid_x, tile_h, tile_w))
}

/// Check that a clip limit and tile grid are usable.
pub fn validate_clahe_params(clip_limit: f32, grid: (usize, usize)) -> Result<()> {
    if !clip_limit.is_finite() || clip_limit <= 0.0 {
        return Err(CanopyError::InvalidParameter(format!(
            "clip limit must be positive, got {clip_limit}"
        )));
    }
    if grid.0 == 0 || grid.1 == 0 {
        return Err(CanopyError::InvalidParameter(format!(
            "tile grid must be at least 1x1, got {}x{}",
            grid.0, grid.1
        )));
    }
    Ok(())
}

/// Pad the plane on the bottom/right so both dimensions are multiples of the grid.
fn extend_reflect101(plane: &Array2<u8>, grid_y: usize, grid_x: usize) -> Array2<u8> {
    let (h, w) = plane.dim();
    let ext_h = h.div_ceil(grid_y) * grid_y;
    let ext_w = w.div_ceil(grid_x) * grid_x;
    if ext_h == h && ext_w == w {
        return plane.clone();
    }
    Array2::from_shape_fn((ext_h, ext_w), |(row, col)| {
        plane[[reflect101(row, h), reflect101(col, w)]]
    })
}

/// Mirror an out-of-range index without repeating the edge sample.
fn reflect101(idx: usize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * len - 2;
    let r = idx % period;
    if r >= len {
        period - r
    } else {
        r
    }
}

fn compute_tile_luts(
    source: &Array2<u8>,
    grid_y: usize,
    grid_x: usize,
    tile_h: usize,
    tile_w: usize,
    clip_limit: f32,
) -> Vec<Lut> {
    (0..grid_y * grid_x)
        .map(|t| {
            let (ty, tx) = (t / grid_x, t % grid_x);
            let y0 = ty * tile_h;
            let x0 = tx * tile_w;
            let mut hist = [0usize; HISTOGRAM_BINS];
            for row in y0..y0 + tile_h {
                for col in x0..x0 + tile_w {
                    hist[source[[row, col]] as usize] += 1;
                }
            }
            tile_lut(&mut hist, tile_h * tile_w, clip_limit)
        })
        .collect()
}

/// Clip a tile histogram, redistribute the excess and turn the CDF into a LUT.
fn tile_lut(hist: &mut [usize; HISTOGRAM_BINS], area: usize, clip_limit: f32) -> Lut {
    let bin_limit = ((clip_limit * area as f32 / HISTOGRAM_BINS as f32) as usize).max(1);

    let mut clipped = 0usize;
    for bin in hist.iter_mut() {
        if *bin > bin_limit {
            clipped += *bin - bin_limit;
            *bin = bin_limit;
        }
    }

    let batch = clipped / HISTOGRAM_BINS;
    let mut residual = clipped % HISTOGRAM_BINS;
    for bin in hist.iter_mut() {
        *bin += batch;
    }
    if residual > 0 {
        let step = (HISTOGRAM_BINS / residual).max(1);
        let mut i = 0;
        while i < HISTOGRAM_BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }

    let scale = 255.0f32 / area as f32;
    let mut lut = [0u8; HISTOGRAM_BINS];
    let mut cdf = 0usize;
    for (i, &count) in hist.iter().enumerate() {
        cdf += count;
        lut[i] = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Neighbouring tile indices and the weight of the second one along one axis.
#[inline]
fn tile_neighbours(pos: usize, inv_tile: f32, tiles: usize) -> (usize, usize, f32) {
    let tf = pos as f32 * inv_tile - 0.5;
    let t1 = tf.floor();
    let weight = tf - t1;
    let t1 = t1 as isize;
    let lo = t1.max(0) as usize;
    let hi = ((t1 + 1).max(0) as usize).min(tiles - 1);
    (lo, hi, weight)
}

fn interpolate_row(
    plane: &Array2<u8>,
    luts: &[Lut],
    row: usize,
    grid_y: usize,
    grid_x: usize,
    tile_h: usize,
    tile_w: usize,
) -> Vec<u8> {
    let w = plane.ncols();
    let (ty1, ty2, ya) = tile_neighbours(row, 1.0 / tile_h as f32, grid_y);
    let inv_tile_w = 1.0 / tile_w as f32;
    (0..w)
        .map(|col| {
            let (tx1, tx2, xa) = tile_neighbours(col, inv_tile_w, grid_x);
            let v = plane[[row, col]] as usize;
            let tl = luts[ty1 * grid_x + tx1][v] as f32;
            let tr = luts[ty1 * grid_x + tx2][v] as f32;
            let bl = luts[ty2 * grid_x + tx1][v] as f32;
            let br = luts[ty2 * grid_x + tx2][v] as f32;
            let top = (1.0 - xa) * tl + xa * tr;
            let bottom = (1.0 - xa) * bl + xa * br;
            ((1.0 - ya) * top + ya * bottom).round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

fn interpolate(
    plane: &Array2<u8>,
    luts: &[Lut],
    grid_y: usize,
    grid_x: usize,
    tile_h: usize,
    tile_w: usize,
) -> Array2<u8> {
    let (h, w) = plane.dim();
    let rows: Vec<Vec<u8>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h)
            .into_par_iter()
            .map(|row| interpolate_row(plane, luts, row, grid_y, grid_x, tile_h, tile_w))
            .collect()
    } else {
        (0..h)
            .map(|row| interpolate_row(plane, luts, row, grid_y, grid_x, tile_h, tile_w))
            .collect()
    };

    let mut result = Array2::<u8>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect101() {
        assert_eq!(reflect101(0, 4), 0);
        assert_eq!(reflect101(3, 4), 3);
        assert_eq!(reflect101(4, 4), 2);
        assert_eq!(reflect101(5, 4), 1);
        assert_eq!(reflect101(6, 4), 0);
        assert_eq!(reflect101(7, 1), 0);
    }

    #[test]
    fn test_tile_lut_single_pixel_tile() {
        let mut hist = [0usize; HISTOGRAM_BINS];
        hist[100] = 1;
        let lut = tile_lut(&mut hist, 1, 1.5);
        assert_eq!(lut[99], 0);
        assert_eq!(lut[100], 255);
    }

    #[test]
    fn test_tile_lut_clips_and_redistributes() {
        // 64 identical pixels, limit 1 per bin: 63 spread with stride 4 from bin 0.
        let mut hist = [0usize; HISTOGRAM_BINS];
        hist[100] = 64;
        let lut = tile_lut(&mut hist, 64, 1.5);
        let total: usize = hist.iter().sum();
        assert_eq!(total, 64);
        // Bins 0, 4, .., 100 received one pixel each (26), plus bin 100's own.
        assert_eq!(lut[100], (27.0f32 * 255.0 / 64.0).round() as u8);
    }

    #[test]
    fn test_extension_only_when_needed() {
        let plane = Array2::<u8>::zeros((16, 16));
        assert_eq!(extend_reflect101(&plane, 8, 8).dim(), (16, 16));
        let plane = Array2::<u8>::zeros((10, 3));
        assert_eq!(extend_reflect101(&plane, 8, 8).dim(), (16, 8));
    }
}
