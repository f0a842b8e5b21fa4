use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::consts::{MIN_SERIES_LEN, PARALLEL_IMAGE_THRESHOLD};
use crate::error::{CanopyError, Result};
use crate::exposure::classify_exposure;
use crate::filters::gamma::gamma_correct;
use crate::filters::luma_equalize::equalize_luma;
use crate::frame::ColorImage;
use crate::growth::{compute_growth_rates, summarize};
use crate::vegetation::{self, VegetationMeasurement};

use super::config::{AnalysisConfig, BatchPolicy};
use super::types::{
    Enhancement, NoOpReporter, PipelineStage, ProgressReporter, SeriesAnalysis, SeriesInput,
};

/// Classify brightness, pick parameters, equalize luma and gamma-correct.
///
/// Returns the enhanced image along with the brightness class and the
/// parameters that were applied.
pub fn enhance_reported(image: &ColorImage) -> Result<Enhancement> {
    let brightness = classify_exposure(image)?;
    let params = *brightness.bucket.parameters();
    params.validate()?;
    info!(
        bucket = %brightness.bucket,
        clip_limit = params.clip_limit,
        tile_rows = params.tile_grid.0,
        tile_cols = params.tile_grid.1,
        gamma = params.gamma,
        "Parameters selected"
    );

    let equalized = equalize_luma(image, &params)?;
    let enhanced = gamma_correct(&equalized, params.gamma)?;

    Ok(Enhancement {
        image: enhanced,
        brightness,
        params,
    })
}

/// Adaptive enhancement of a single image.
pub fn enhance(image: &ColorImage) -> Result<ColorImage> {
    enhance_reported(image).map(|e| e.image)
}

/// Measure vegetation coverage of an image as given.
pub fn measure_vegetation(
    image: &ColorImage,
    source: impl Into<String>,
    timestamp: SystemTime,
) -> Result<VegetationMeasurement> {
    vegetation::measure(image, source, timestamp)
}

/// Enhance and measure one input. Image and parameter errors are prefixed
/// with the input's source.
fn process_input(input: &SeriesInput) -> Result<VegetationMeasurement> {
    enhance(&input.image)
        .and_then(|enhanced| {
            measure_vegetation(&enhanced, input.source.clone(), input.timestamp)
        })
        .map_err(|e| match e {
            CanopyError::InvalidImage(msg) => {
                CanopyError::InvalidImage(format!("{}: {msg}", input.source))
            }
            CanopyError::InvalidParameter(msg) => {
                CanopyError::InvalidParameter(format!("{}: {msg}", input.source))
            }
            other => other,
        })
}

fn ensure_series_len(actual: usize) -> Result<()> {
    if actual < MIN_SERIES_LEN {
        return Err(CanopyError::InsufficientInput {
            required: MIN_SERIES_LEN,
            actual,
        });
    }
    Ok(())
}

/// Run the per-image pipeline over the series and compute growth rates,
/// reporting progress through `reporter`.
///
/// Results keep the order of `inputs` regardless of parallel execution.
pub fn analyze_series_reported(
    inputs: &[SeriesInput],
    config: &AnalysisConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<SeriesAnalysis> {
    ensure_series_len(inputs.len())?;
    info!(
        images = inputs.len(),
        parallel = config.parallel,
        policy = %config.batch_policy,
        "Analyzing series"
    );

    reporter.begin_stage(PipelineStage::Enhancing, Some(inputs.len()));
    let done = AtomicUsize::new(0);
    let run_one = |input: &SeriesInput| {
        let result = process_input(input);
        reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
        result
    };

    let parallel = config.parallel && inputs.len() >= PARALLEL_IMAGE_THRESHOLD;
    let (measurements, skipped) = match config.batch_policy {
        BatchPolicy::AbortOnFirstError => {
            let measurements: Vec<VegetationMeasurement> = if parallel {
                inputs.par_iter().map(run_one).collect::<Result<_>>()?
            } else {
                inputs.iter().map(run_one).collect::<Result<_>>()?
            };
            (measurements, Vec::new())
        }
        BatchPolicy::SkipInvalid => {
            let results: Vec<Result<VegetationMeasurement>> = if parallel {
                inputs.par_iter().map(run_one).collect()
            } else {
                inputs.iter().map(run_one).collect()
            };
            let mut measurements = Vec::with_capacity(results.len());
            let mut skipped = Vec::new();
            for (input, result) in inputs.iter().zip(results) {
                match result {
                    Ok(m) => measurements.push(m),
                    Err(e) => {
                        warn!(source = %input.source, error = %e, "Skipping image");
                        skipped.push((input.source.clone(), e.to_string()));
                    }
                }
            }
            (measurements, skipped)
        }
    };
    reporter.finish_stage();

    ensure_series_len(measurements.len())?;

    reporter.begin_stage(PipelineStage::ComputingGrowth, Some(measurements.len() - 1));
    let growth_rates = compute_growth_rates(&measurements, config.zero_baseline)?;
    let summary = summarize(&measurements, &growth_rates, config.zero_baseline)?;
    reporter.advance(measurements.len() - 1);
    reporter.finish_stage();

    info!(
        measurements = measurements.len(),
        growth_entries = growth_rates.len(),
        skipped = skipped.len(),
        "Series analysis complete"
    );

    Ok(SeriesAnalysis {
        measurements,
        growth_rates,
        summary,
        skipped,
    })
}

/// Run series analysis without progress reporting.
pub fn analyze_series(inputs: &[SeriesInput], config: &AnalysisConfig) -> Result<SeriesAnalysis> {
    analyze_series_reported(inputs, config, Arc::new(NoOpReporter))
}
