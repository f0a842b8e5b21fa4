use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{Context, Result};
use canopy_core::io::image_io::load_image;
use canopy_core::pipeline::{enhance, measure_vegetation};
use clap::Args;

use super::analyze::source_name;

#[derive(Args)]
pub struct MeasureArgs {
    /// Input image file (PNG or JPEG)
    pub file: PathBuf,

    /// Measure the image as loaded, without adaptive enhancement
    #[arg(long)]
    pub no_enhance: bool,
}

pub fn run(args: &MeasureArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let image = if args.no_enhance {
        image
    } else {
        enhance(&image)?
    };

    let measurement = measure_vegetation(&image, source_name(&args.file), SystemTime::now())?;
    println!(
        "{}: {:.2}% vegetation",
        measurement.source, measurement.vegetation_fraction
    );

    Ok(())
}
