pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{
    analyze_series, analyze_series_reported, enhance, enhance_reported, measure_vegetation,
};
pub use types::{Enhancement, PipelineStage, ProgressReporter, SeriesAnalysis, SeriesInput};
