use serde::{Deserialize, Serialize};

use crate::growth::ZeroBaselinePolicy;

/// Settings for series analysis, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub batch_policy: BatchPolicy,
    #[serde(default)]
    pub zero_baseline: ZeroBaselinePolicy,
    /// Process images on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            batch_policy: BatchPolicy::default(),
            zero_baseline: ZeroBaselinePolicy::default(),
            parallel: default_parallel(),
        }
    }
}

/// What a series does when one image fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPolicy {
    /// The first failing image aborts the whole series.
    #[default]
    AbortOnFirstError,
    /// Failing images are dropped and reported in `SeriesAnalysis::skipped`.
    SkipInvalid,
}

impl std::fmt::Display for BatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AbortOnFirstError => write!(f, "Abort on first error"),
            Self::SkipInvalid => write!(f, "Skip invalid"),
        }
    }
}
