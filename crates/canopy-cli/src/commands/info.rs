use std::path::PathBuf;

use anyhow::{Context, Result};
use canopy_core::exposure::classify_exposure;
use canopy_core::io::image_io::load_image;
use canopy_core::vegetation::vegetation_fraction;
use clap::Args;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file (PNG or JPEG)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let class = classify_exposure(&image)?;
    let params = class.bucket.parameters();
    let raw_fraction = vegetation_fraction(&image)?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", image.width(), image.height());
    println!("Median:      {:.1}", class.median);
    println!("Exposure:    {}", class.bucket);
    println!("Clip limit:  {}", params.clip_limit);
    println!("Tile grid:   {}x{}", params.tile_grid.0, params.tile_grid.1);
    println!("Gamma:       {}", params.gamma);
    println!("Vegetation:  {:.2}% (unenhanced)", raw_fraction);

    Ok(())
}
