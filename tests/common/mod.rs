#![allow(dead_code)]

use binforge::binning::{validate, BinSpacing, BinSpec};
use binforge::config::ClassificationSettings;

pub fn even_settings(bin_count: usize, low: f64, high: f64) -> ClassificationSettings {
    ClassificationSettings {
        object_name: "Nuclei".to_string(),
        measurement: "AreaShape_Area".to_string(),
        bin_choice: BinSpacing::Even,
        bin_count,
        low_threshold: low,
        high_threshold: high,
        ..Default::default()
    }
}

pub fn custom_settings(thresholds: &str) -> ClassificationSettings {
    ClassificationSettings {
        object_name: "Nuclei".to_string(),
        measurement: "AreaShape_Area".to_string(),
        bin_choice: BinSpacing::Custom,
        custom_thresholds: thresholds.to_string(),
        ..Default::default()
    }
}

pub fn spec(settings: &ClassificationSettings) -> BinSpec {
    validate(settings).expect("test settings should validate")
}

/// Index of the single bin holding object `o`, if any.
pub fn bin_of(row: &[bool]) -> Option<usize> {
    row.iter().position(|&hit| hit)
}
