use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::exposure::{BrightnessClass, EnhancementParameters};
use crate::frame::ColorImage;
use crate::growth::{GrowthRateEntry, GrowthSummary};
use crate::vegetation::VegetationMeasurement;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    /// Decoding input files; driven by the caller.
    Loading,
    /// Per-image enhancement followed by vegetation measurement.
    Enhancing,
    ComputingGrowth,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading images"),
            Self::Enhancing => write!(f, "Enhancing images"),
            Self::ComputingGrowth => write!(f, "Computing growth"),
        }
    }
}

/// Result of adaptive enhancement together with the decisions behind it.
#[derive(Clone, Debug)]
pub struct Enhancement {
    pub image: ColorImage,
    pub brightness: BrightnessClass,
    pub params: EnhancementParameters,
}

/// One photograph in a series, in caller order.
#[derive(Clone, Debug)]
pub struct SeriesInput {
    pub image: ColorImage,
    pub source: String,
    pub timestamp: SystemTime,
}

impl SeriesInput {
    pub fn new(image: ColorImage, source: impl Into<String>, timestamp: SystemTime) -> Self {
        Self {
            image,
            source: source.into(),
            timestamp,
        }
    }
}

/// Output of series analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    /// One measurement per processed image, in input order.
    pub measurements: Vec<VegetationMeasurement>,
    /// One entry per adjacent measurement pair, in input order.
    pub growth_rates: Vec<GrowthRateEntry>,
    pub summary: GrowthSummary,
    /// Sources dropped under `BatchPolicy::SkipInvalid`, with the reason.
    pub skipped: Vec<(String, String)>,
}

/// Thread-safe progress reporting for the pipeline.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage, if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// Work items completed so far within the current stage.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `analyze_series` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
