use std::path::PathBuf;

use anyhow::{Context, Result};
use canopy_core::io::image_io::{load_image, save_image, save_mask};
use canopy_core::pipeline::enhance_reported;
use canopy_core::vegetation::vegetation_mask;
use clap::Args;

#[derive(Args)]
pub struct EnhanceArgs {
    /// Input image file (PNG or JPEG)
    pub file: PathBuf,

    /// Also write the vegetation mask of the enhanced image
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "enhanced.png")]
    pub output: PathBuf,
}

pub fn run(args: &EnhanceArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!("Loaded {}x{} image", image.width(), image.height());

    let enhancement = enhance_reported(&image)?;
    println!(
        "Median {:.1} -> {} (clip limit {}, gamma {})",
        enhancement.brightness.median,
        enhancement.brightness.bucket,
        enhancement.params.clip_limit,
        enhancement.params.gamma
    );

    save_image(&enhancement.image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    if let Some(ref mask_path) = args.mask {
        let mask = vegetation_mask(&enhancement.image);
        save_mask(&mask, mask_path)
            .with_context(|| format!("Failed to write {}", mask_path.display()))?;
        println!("Mask saved to {}", mask_path.display());
    }

    Ok(())
}
