//! Pairwise growth rates over an ordered series of vegetation measurements.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::MIN_SERIES_LEN;
use crate::error::{CanopyError, Result};
use crate::vegetation::VegetationMeasurement;

/// How to treat a pair whose earlier measurement has zero vegetation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroBaselinePolicy {
    /// Fail with `DivisionByZeroGrowth`.
    #[default]
    Error,
    /// Leave the pair out of the series.
    Skip,
    /// Keep raw IEEE division: +inf, -inf, or NaN for 0 -> 0.
    NonFinite,
}

impl std::fmt::Display for ZeroBaselinePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "Error"),
            Self::Skip => write!(f, "Skip"),
            Self::NonFinite => write!(f, "Non-finite"),
        }
    }
}

/// Growth between two adjacent measurements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthRateEntry {
    pub from: VegetationMeasurement,
    pub to: VegetationMeasurement,
    #[serde(with = "non_finite")]
    pub growth_rate_percent: f64,
}

/// Whole-series overview.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub first_fraction: f64,
    pub last_fraction: f64,
    /// Change from the first to the last measurement, in percent.
    /// `None` when the first fraction is zero and the policy skips it.
    #[serde(with = "non_finite::option")]
    pub net_growth_percent: Option<f64>,
    /// Mean of the pairwise rates; `None` when there are no entries.
    #[serde(with = "non_finite::option")]
    pub mean_growth_percent: Option<f64>,
}

/// Serde adapter for rates that may be infinite or NaN.
///
/// Finite values stay plain numbers; the rest are written as `"inf"`,
/// `"-inf"` or `"NaN"` so they survive formats such as JSON.
mod non_finite {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    struct Rate(f64);

    impl Serialize for Rate {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let v = self.0;
            if v.is_finite() {
                serializer.serialize_f64(v)
            } else if v.is_nan() {
                serializer.serialize_str("NaN")
            } else if v > 0.0 {
                serializer.serialize_str("inf")
            } else {
                serializer.serialize_str("-inf")
            }
        }
    }

    impl<'de> Deserialize<'de> for Rate {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match Repr::deserialize(deserializer)? {
                Repr::Number(v) => Ok(Rate(v)),
                Repr::Text(text) => match text.as_str() {
                    "inf" => Ok(Rate(f64::INFINITY)),
                    "-inf" => Ok(Rate(f64::NEG_INFINITY)),
                    "NaN" => Ok(Rate(f64::NAN)),
                    other => Err(D::Error::custom(format!("invalid rate: {other}"))),
                },
            }
        }
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        Rate(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Rate::deserialize(deserializer).map(|r| r.0)
    }

    pub mod option {
        use super::Rate;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<f64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            value.map(Rate).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<f64>, D::Error> {
            Option::<Rate>::deserialize(deserializer).map(|o| o.map(|r| r.0))
        }
    }
}

/// Percentage change from `prev` to `curr` under the given policy.
///
/// Returns `Ok(None)` when the pair is skipped.
fn percent_change(
    prev: &VegetationMeasurement,
    curr: &VegetationMeasurement,
    policy: ZeroBaselinePolicy,
) -> Result<Option<f64>> {
    let base = prev.vegetation_fraction;
    if base == 0.0 {
        match policy {
            ZeroBaselinePolicy::Error => {
                return Err(CanopyError::DivisionByZeroGrowth {
                    from: prev.source.clone(),
                    to: curr.source.clone(),
                })
            }
            ZeroBaselinePolicy::Skip => {
                warn!(from = %prev.source, to = %curr.source, "Skipping pair with zero baseline");
                return Ok(None);
            }
            ZeroBaselinePolicy::NonFinite => {}
        }
    }
    Ok(Some((curr.vegetation_fraction - base) / base * 100.0))
}

fn ensure_series_len(measurements: &[VegetationMeasurement]) -> Result<()> {
    if measurements.len() < MIN_SERIES_LEN {
        return Err(CanopyError::InsufficientInput {
            required: MIN_SERIES_LEN,
            actual: measurements.len(),
        });
    }
    Ok(())
}

/// Compute one growth entry per adjacent pair, in input order.
///
/// With `ZeroBaselinePolicy::Skip` the result may hold fewer than `n - 1` entries.
pub fn compute_growth_rates(
    measurements: &[VegetationMeasurement],
    policy: ZeroBaselinePolicy,
) -> Result<Vec<GrowthRateEntry>> {
    ensure_series_len(measurements)?;

    let mut entries = Vec::with_capacity(measurements.len() - 1);
    for pair in measurements.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if let Some(growth_rate_percent) = percent_change(prev, curr, policy)? {
            debug!(
                from = %prev.source,
                to = %curr.source,
                growth_rate_percent,
                "Growth rate computed"
            );
            entries.push(GrowthRateEntry {
                from: prev.clone(),
                to: curr.clone(),
                growth_rate_percent,
            });
        }
    }
    Ok(entries)
}

/// Summarize a series and the growth entries derived from it.
pub fn summarize(
    measurements: &[VegetationMeasurement],
    entries: &[GrowthRateEntry],
    policy: ZeroBaselinePolicy,
) -> Result<GrowthSummary> {
    ensure_series_len(measurements)?;
    let first = &measurements[0];
    let last = &measurements[measurements.len() - 1];

    let net_growth_percent = percent_change(first, last, policy)?;
    let mean_growth_percent = if entries.is_empty() {
        None
    } else {
        let sum: f64 = entries.iter().map(|e| e.growth_rate_percent).sum();
        Some(sum / entries.len() as f64)
    };

    Ok(GrowthSummary {
        first_fraction: first.vegetation_fraction,
        last_fraction: last.vegetation_fraction,
        net_growth_percent,
        mean_growth_percent,
    })
}
