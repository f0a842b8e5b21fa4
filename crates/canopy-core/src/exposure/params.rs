use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TILE_GRID;
use crate::error::Result;
use crate::filters::clahe::validate_clahe_params;
use crate::filters::gamma::gamma_lut;

use super::ExposureBucket;

/// Contrast and gamma settings applied to one exposure bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnhancementParameters {
    /// Histogram clip limit for adaptive equalization.
    pub clip_limit: f32,
    /// Equalization tile layout as (rows, cols).
    pub tile_grid: (usize, usize),
    /// Gamma exponent; > 1.0 brightens, < 1.0 darkens.
    pub gamma: f32,
}

impl EnhancementParameters {
    /// Reject non-positive clip limits, empty grids and non-positive gamma.
    pub fn validate(&self) -> Result<()> {
        validate_clahe_params(self.clip_limit, self.tile_grid)?;
        gamma_lut(self.gamma).map(|_| ())
    }
}

static UNDEREXPOSED: EnhancementParameters = EnhancementParameters {
    clip_limit: 2.0,
    tile_grid: DEFAULT_TILE_GRID,
    gamma: 1.2,
};

static MODERATELY_DARK: EnhancementParameters = EnhancementParameters {
    clip_limit: 1.5,
    tile_grid: DEFAULT_TILE_GRID,
    gamma: 1.1,
};

static NORMAL: EnhancementParameters = EnhancementParameters {
    clip_limit: 1.2,
    tile_grid: DEFAULT_TILE_GRID,
    gamma: 1.0,
};

static OVEREXPOSED: EnhancementParameters = EnhancementParameters {
    clip_limit: 3.0,
    tile_grid: DEFAULT_TILE_GRID,
    gamma: 0.6,
};

/// Look up the enhancement parameters for a bucket.
pub fn parameters_for(bucket: ExposureBucket) -> &'static EnhancementParameters {
    match bucket {
        ExposureBucket::Underexposed => &UNDEREXPOSED,
        ExposureBucket::ModeratelyDark => &MODERATELY_DARK,
        ExposureBucket::Normal => &NORMAL,
        ExposureBucket::Overexposed => &OVEREXPOSED,
    }
}
