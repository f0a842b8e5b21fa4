#[allow(dead_code)]
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ndarray::Array3;

use canopy_core::error::CanopyError;
use canopy_core::exposure::{parameters_for, ExposureBucket};
use canopy_core::filters::gamma::{gamma_correct, gamma_lut};
use canopy_core::filters::luma_equalize::equalize_luma;
use canopy_core::frame::ColorImage;
use canopy_core::growth::ZeroBaselinePolicy;
use canopy_core::pipeline::config::{AnalysisConfig, BatchPolicy};
use canopy_core::pipeline::{
    analyze_series, analyze_series_reported, enhance, enhance_reported, measure_vegetation,
    PipelineStage, ProgressReporter, SeriesInput,
};
use canopy_core::vegetation::vegetation_fraction;

// ---------------------------------------------------------------------------
// enhance
// ---------------------------------------------------------------------------

#[test]
fn test_enhance_uniform_gray_moderately_dark() {
    let img = common::gray(2, 2, 100);
    let result = enhance_reported(&img).unwrap();

    assert_eq!(result.brightness.median, 100.0);
    assert_eq!(result.brightness.bucket, ExposureBucket::ModeratelyDark);
    assert_eq!(result.params.clip_limit, 1.5);
    assert_eq!(result.params.gamma, 1.1);

    assert_eq!(result.image.height(), 2);
    assert_eq!(result.image.width(), 2);
    assert_eq!(result.image.channels(), 3);

    // Output is the equalized image remapped through the gamma 1.1 table.
    let params = parameters_for(ExposureBucket::ModeratelyDark);
    let equalized = equalize_luma(&img, params).unwrap();
    let lut = gamma_lut(1.1).unwrap();
    for (out, eq) in result.image.data.iter().zip(equalized.data.iter()) {
        assert_eq!(*out, lut[*eq as usize]);
    }
    assert_eq!(result.image, gamma_correct(&equalized, 1.1).unwrap());
}

#[test]
fn test_enhance_preserves_dimensions() {
    let images = [
        common::gray(1, 1, 30),
        common::gray(3, 5, 150),
        common::pattern(37, 19),
        common::gray_ramp(64, 48),
        common::gray(16, 16, 230),
    ];
    for img in &images {
        let out = enhance(img).unwrap();
        assert_eq!(out.data.dim(), img.data.dim());
    }
}

#[test]
fn test_enhance_normal_bucket_applies_no_gamma() {
    // Normal exposure uses gamma 1.0, so enhancement equals equalization alone.
    let img = common::gray(32, 32, 160);
    let result = enhance_reported(&img).unwrap();
    assert_eq!(result.brightness.bucket, ExposureBucket::Normal);
    let equalized = equalize_luma(&img, parameters_for(ExposureBucket::Normal)).unwrap();
    assert_eq!(result.image, equalized);
}

#[test]
fn test_enhance_empty_image_fails() {
    let img = ColorImage::new(Array3::<u8>::zeros((0, 0, 3))).unwrap();
    assert!(matches!(enhance(&img), Err(CanopyError::InvalidImage(_))));
}

#[test]
fn test_measure_vegetation_uses_image_as_given() {
    let img = common::canopy_columns(4, 4, 2);
    let m = measure_vegetation(&img, "plot.png", common::at(5)).unwrap();
    assert_eq!(m.vegetation_fraction, 50.0);
    assert_eq!(m.source, "plot.png");
}

// ---------------------------------------------------------------------------
// analyze_series
// ---------------------------------------------------------------------------

fn series_inputs() -> Vec<SeriesInput> {
    vec![
        SeriesInput::new(common::canopy_columns(24, 24, 4), "day1.png", common::at(0)),
        SeriesInput::new(common::canopy_columns(24, 24, 12), "day2.png", common::at(86_400)),
        SeriesInput::new(common::canopy_columns(24, 24, 20), "day3.png", common::at(172_800)),
    ]
}

#[test]
fn test_analyze_series_matches_per_image_pipeline() {
    let inputs = series_inputs();
    let config = AnalysisConfig {
        zero_baseline: ZeroBaselinePolicy::NonFinite,
        ..Default::default()
    };
    let analysis = analyze_series(&inputs, &config).unwrap();

    assert_eq!(analysis.measurements.len(), 3);
    assert_eq!(analysis.growth_rates.len(), 2);
    assert!(analysis.skipped.is_empty());

    for (input, m) in inputs.iter().zip(&analysis.measurements) {
        assert_eq!(m.source, input.source);
        assert_eq!(m.timestamp, input.timestamp);
        let expected = vegetation_fraction(&enhance(&input.image).unwrap()).unwrap();
        assert_eq!(m.vegetation_fraction, expected);
    }

    for (i, entry) in analysis.growth_rates.iter().enumerate() {
        assert_eq!(entry.from, analysis.measurements[i]);
        assert_eq!(entry.to, analysis.measurements[i + 1]);
    }
}

#[test]
fn test_analyze_series_parallel_equals_sequential() {
    let inputs: Vec<SeriesInput> = (0..6)
        .map(|i| {
            SeriesInput::new(
                common::canopy_columns(20, 20, 2 + i * 3),
                format!("img{i}.png"),
                common::at(i as u64),
            )
        })
        .collect();
    let parallel = AnalysisConfig {
        zero_baseline: ZeroBaselinePolicy::NonFinite,
        ..Default::default()
    };
    let sequential = AnalysisConfig {
        parallel: false,
        ..parallel.clone()
    };

    let a = analyze_series(&inputs, &parallel).unwrap();
    let b = analyze_series(&inputs, &sequential).unwrap();
    assert_eq!(a.measurements, b.measurements);
    let sources: Vec<_> = a.measurements.iter().map(|m| m.source.as_str()).collect();
    assert_eq!(
        sources,
        ["img0.png", "img1.png", "img2.png", "img3.png", "img4.png", "img5.png"]
    );
}

#[test]
fn test_analyze_series_insufficient_input() {
    let config = AnalysisConfig::default();
    let err = analyze_series(&[], &config).unwrap_err();
    assert!(matches!(
        err,
        CanopyError::InsufficientInput {
            required: 2,
            actual: 0
        }
    ));

    let one = vec![SeriesInput::new(common::gray(4, 4, 80), "only.png", common::at(0))];
    let err = analyze_series(&one, &config).unwrap_err();
    assert!(matches!(
        err,
        CanopyError::InsufficientInput {
            required: 2,
            actual: 1
        }
    ));
}

fn empty_image() -> ColorImage {
    ColorImage::new(Array3::<u8>::zeros((0, 0, 3))).unwrap()
}

#[test]
fn test_analyze_series_aborts_on_invalid_image() {
    let mut inputs = series_inputs();
    inputs.insert(1, SeriesInput::new(empty_image(), "broken.png", common::at(1)));
    let config = AnalysisConfig {
        zero_baseline: ZeroBaselinePolicy::NonFinite,
        ..Default::default()
    };
    match analyze_series(&inputs, &config) {
        Err(CanopyError::InvalidImage(msg)) => {
            assert!(msg.starts_with("broken.png: "), "message was {msg:?}")
        }
        other => panic!("expected InvalidImage, got {other:?}"),
    }
}

#[test]
fn test_analyze_series_skip_invalid() {
    let mut inputs = series_inputs();
    inputs.insert(1, SeriesInput::new(empty_image(), "broken.png", common::at(1)));
    let config = AnalysisConfig {
        batch_policy: BatchPolicy::SkipInvalid,
        zero_baseline: ZeroBaselinePolicy::NonFinite,
        ..Default::default()
    };
    let analysis = analyze_series(&inputs, &config).unwrap();
    assert_eq!(analysis.measurements.len(), 3);
    assert_eq!(analysis.growth_rates.len(), 2);
    assert_eq!(analysis.skipped.len(), 1);
    assert_eq!(analysis.skipped[0].0, "broken.png");
    assert_eq!(analysis.measurements[1].source, "day2.png");
}

#[test]
fn test_analyze_series_skip_leaving_one_image_fails() {
    let inputs = vec![
        SeriesInput::new(common::gray(8, 8, 90), "ok.png", common::at(0)),
        SeriesInput::new(empty_image(), "broken.png", common::at(1)),
    ];
    let config = AnalysisConfig {
        batch_policy: BatchPolicy::SkipInvalid,
        ..Default::default()
    };
    assert!(matches!(
        analyze_series(&inputs, &config),
        Err(CanopyError::InsufficientInput { actual: 1, .. })
    ));
}

#[test]
fn test_analyze_series_zero_vegetation_errors_by_default() {
    // Gray photos have no saturation, so nothing is vegetation.
    let inputs = vec![
        SeriesInput::new(common::gray(8, 8, 90), "a.png", common::at(0)),
        SeriesInput::new(common::gray(8, 8, 120), "b.png", common::at(1)),
    ];
    let err = analyze_series(&inputs, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, CanopyError::DivisionByZeroGrowth { .. }));
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<PipelineStage>>,
    max_done: AtomicUsize,
    finished: AtomicUsize,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, _total_items: Option<usize>) {
        self.stages.lock().unwrap().push(stage);
    }

    fn advance(&self, items_done: usize) {
        self.max_done.fetch_max(items_done, Ordering::SeqCst);
    }

    fn finish_stage(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_progress_reporter_sees_every_stage() {
    let reporter = Arc::new(RecordingReporter::default());
    let config = AnalysisConfig {
        zero_baseline: ZeroBaselinePolicy::NonFinite,
        ..Default::default()
    };
    analyze_series_reported(&series_inputs(), &config, reporter.clone()).unwrap();

    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![PipelineStage::Enhancing, PipelineStage::ComputingGrowth]
    );
    assert_eq!(reporter.max_done.load(Ordering::SeqCst), 3);
    assert_eq!(reporter.finished.load(Ordering::SeqCst), 2);
}
