use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};
use canopy_core::growth::ZeroBaselinePolicy;
use canopy_core::io::image_io::{is_supported_image, load_image};
use canopy_core::pipeline::config::{AnalysisConfig, BatchPolicy};
use canopy_core::pipeline::{
    analyze_series_reported, PipelineStage, ProgressReporter, SeriesInput,
};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::summary::print_series_summary;

#[derive(Clone, ValueEnum)]
pub enum ZeroBaselineArg {
    Error,
    Skip,
    NonFinite,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Image files or directories, in series order (directory entries are sorted by name)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Drop images that fail instead of aborting the series
    #[arg(long)]
    pub skip_invalid: bool,

    /// How to treat a pair whose earlier vegetation fraction is zero
    #[arg(long, value_enum)]
    pub zero_baseline: Option<ZeroBaselineArg>,

    /// Process images one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Write the full analysis as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Drives an indicatif bar from pipeline progress callbacks.
struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
        self.pb.set_length(total_items.unwrap_or(0) as u64);
        self.pb.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }
}

/// Identifier used for an image: its file name, or the full path if it has none.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expand directories into their supported image files, sorted by name.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)
                .with_context(|| format!("Failed to read directory {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_supported_image(p))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn load_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config: AnalysisConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid analysis config")?
    } else {
        AnalysisConfig::default()
    };

    if args.skip_invalid {
        config.batch_policy = BatchPolicy::SkipInvalid;
    }
    if let Some(ref zb) = args.zero_baseline {
        config.zero_baseline = match zb {
            ZeroBaselineArg::Error => ZeroBaselinePolicy::Error,
            ZeroBaselineArg::Skip => ZeroBaselinePolicy::Skip,
            ZeroBaselineArg::NonFinite => ZeroBaselinePolicy::NonFinite,
        };
    }
    if args.sequential {
        config.parallel = false;
    }
    Ok(config)
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = load_config(args)?;
    let files = expand_inputs(&args.inputs)?;

    println!("Canopy Series Analysis");
    println!("  Images:         {}", files.len());
    println!("  Batch policy:   {}", config.batch_policy);
    println!("  Zero baseline:  {}", config.zero_baseline);
    println!();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:22} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message(PipelineStage::Loading.to_string());

    let mut inputs = Vec::with_capacity(files.len());
    let mut load_skipped = Vec::new();
    for (i, path) in files.iter().enumerate() {
        let source = source_name(path);
        match load_image(path) {
            Ok(image) => inputs.push(SeriesInput::new(image, source, SystemTime::now())),
            Err(e) if config.batch_policy == BatchPolicy::SkipInvalid => {
                warn!(source = %source, error = %e, "Skipping unreadable image");
                load_skipped.push((source, e.to_string()));
            }
            Err(e) => {
                pb.abandon();
                return Err(e).with_context(|| format!("Failed to load {}", path.display()));
            }
        }
        pb.set_position(i as u64 + 1);
    }

    let reporter = Arc::new(BarReporter { pb: pb.clone() });
    let mut analysis = match analyze_series_reported(&inputs, &config, reporter) {
        Ok(analysis) => analysis,
        Err(e) => {
            pb.abandon();
            return Err(e).context("Series analysis failed");
        }
    };
    pb.finish_with_message("Done");

    load_skipped.append(&mut analysis.skipped);
    analysis.skipped = load_skipped;

    print_series_summary(&analysis);

    if let Some(ref json_path) = args.json {
        let json = serde_json::to_string_pretty(&analysis)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        println!("\nReport saved to {}", json_path.display());
    }

    Ok(())
}
