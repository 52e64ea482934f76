use crate::error::{BfResult, BinForgeError};
use crate::host::MeasurementStore;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum BinSpacing {
    /// `bin_count` bins of equal width between the low and high threshold.
    Even,
    /// Bins separated by user supplied thresholds.
    Custom,
}

/// Where a threshold value comes from at run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ThresholdSource {
    Fixed(f64),
    /// Per-image scalar measurement, looked up by feature name.
    Image(String),
}

impl ThresholdSource {
    pub fn resolve<S: MeasurementStore + ?Sized>(&self, store: &S) -> BfResult<f64> {
        match self {
            Self::Fixed(v) => Ok(*v),
            Self::Image(feature) => {
                store
                    .get_image(feature)
                    .ok_or_else(|| BinForgeError::MissingMeasurement {
                        entity: crate::host::IMAGE.to_string(),
                        feature: feature.clone(),
                    })
            }
        }
    }
}

/// A validated classification of one measurement. Only produced by
/// `binning::validate`, so the bin count invariants always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSpec {
    pub object_name: String,
    pub measurement: String,
    pub spacing: BinSpacing,

    // Even spacing
    pub bin_count: usize,
    pub low_threshold: ThresholdSource,
    pub high_threshold: ThresholdSource,

    // Custom spacing, strictly increasing
    pub custom_thresholds: Vec<f64>,

    pub wants_low_bin: bool,
    pub wants_high_bin: bool,

    /// Custom names, one per bin. `None` means auto-generated.
    pub bin_names: Option<Vec<String>>,
    pub image_name: Option<String>,
}

impl BinSpec {
    pub fn number_of_bins(&self) -> usize {
        let inner = match self.spacing {
            BinSpacing::Even => self.bin_count,
            BinSpacing::Custom => self.custom_thresholds.len().saturating_sub(1),
        };
        inner + usize::from(self.wants_low_bin) + usize::from(self.wants_high_bin)
    }

    /// Resolves (low, high) for even spacing. Custom spacing ignores both.
    pub fn resolve_thresholds<S: MeasurementStore + ?Sized>(&self, store: &S) -> BfResult<(f64, f64)> {
        match self.spacing {
            BinSpacing::Even => Ok((
                self.low_threshold.resolve(store)?,
                self.high_threshold.resolve(store)?,
            )),
            BinSpacing::Custom => Ok((f64::NAN, f64::NAN)),
        }
    }
}
