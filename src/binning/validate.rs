use super::naming::{auto_bin_names, feature_name_problem, split_names};
use super::types::{BinSpacing, BinSpec, ThresholdSource};
use crate::config::ClassificationSettings;
use crate::error::{Setting, ValidationError};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Checks one classification group and returns its typed form.
///
/// Rules run in order and the first failure wins:
/// 1. at least one bin
/// 2. custom name count equals the bin count
/// 3. every bin name is a valid column identifier
/// 4. custom thresholds parse as numbers
/// 5. even spacing has a positive bin count
/// 6. static even thresholds satisfy high > low
/// 7. custom thresholds are strictly increasing
/// 8. object and measurement are named
/// 9. bin names are distinct
pub fn validate(settings: &ClassificationSettings) -> Result<BinSpec, ValidationError> {
    let bin_count = settings.number_of_bins();
    if bin_count < 1 {
        let setting = match settings.bin_choice {
            BinSpacing::Even => Setting::BinCount,
            BinSpacing::Custom => Setting::CustomThresholds,
        };
        return Err(ValidationError::new(
            "You must have at least one bin in order to take measurements. \
             Either add more bins or ask for bins for objects above or below threshold",
            setting,
        ));
    }
    let bin_count = bin_count as usize;

    let names = match &settings.bin_names {
        Some(text) => split_names(text),
        None => auto_bin_names(&settings.measurement, bin_count),
    };
    if names.len() != bin_count {
        return Err(ValidationError::new(
            format!(
                "The number of bin names ({}) does not match the number of bins ({}).",
                names.len(),
                bin_count
            ),
            Setting::BinNames,
        ));
    }

    if let Some(problem) = names.iter().find_map(|name| feature_name_problem(name)) {
        return Err(ValidationError::new(problem, Setting::BinNames));
    }

    let custom_thresholds = match settings.bin_choice {
        BinSpacing::Custom => parse_thresholds(settings)?,
        BinSpacing::Even => Vec::new(),
    };

    let low_threshold = threshold_source(
        settings.low_threshold,
        settings.low_threshold_measurement.as_deref(),
    );
    let high_threshold = threshold_source(
        settings.high_threshold,
        settings.high_threshold_measurement.as_deref(),
    );

    match settings.bin_choice {
        BinSpacing::Even => {
            if settings.bin_count < 1 {
                return Err(ValidationError::new(
                    "The number of evenly spaced bins must be at least 1",
                    Setting::BinCount,
                ));
            }
            if let (ThresholdSource::Fixed(low), ThresholdSource::Fixed(high)) =
                (&low_threshold, &high_threshold)
            {
                if high <= low {
                    return Err(ValidationError::new(
                        format!(
                            "The upper threshold ({}) must be greater than the lower threshold ({})",
                            high, low
                        ),
                        Setting::HighThreshold,
                    ));
                }
            }
        }
        BinSpacing::Custom => {
            let increasing = custom_thresholds
                .windows(2)
                .all(|w| w[0].partial_cmp(&w[1]) == Some(Ordering::Less));
            if !increasing {
                return Err(ValidationError::new(
                    format!(
                        "Custom thresholds must be strictly increasing (got \"{}\")",
                        settings.custom_thresholds
                    ),
                    Setting::CustomThresholds,
                ));
            }
        }
    }

    if settings.object_name.trim().is_empty() {
        return Err(ValidationError::new(
            "Select the objects to be classified",
            Setting::ObjectName,
        ));
    }
    if settings.measurement.trim().is_empty() {
        return Err(ValidationError::new(
            "Select the measurement to classify by",
            Setting::Measurement,
        ));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = names.iter().find(|name| !seen.insert(*name)) {
        return Err(ValidationError::new(
            format!("Bin name \"{}\" is used more than once", dup),
            Setting::BinNames,
        ));
    }

    debug!(
        "Validated classification of {}.{} into {} bins",
        settings.object_name, settings.measurement, bin_count
    );

    Ok(BinSpec {
        object_name: settings.object_name.clone(),
        measurement: settings.measurement.clone(),
        spacing: settings.bin_choice,
        bin_count: settings.bin_count,
        low_threshold,
        high_threshold,
        custom_thresholds,
        wants_low_bin: settings.wants_low_bin,
        wants_high_bin: settings.wants_high_bin,
        bin_names: settings.wants_custom_names().then_some(names),
        image_name: settings.image_name.clone(),
    })
}

/// Validates every group in declaration order, stopping at the first failure.
pub fn validate_all(groups: &[ClassificationSettings]) -> Result<Vec<BinSpec>, ValidationError> {
    if groups.is_empty() {
        return Err(ValidationError::new(
            "At least one classification is required",
            Setting::Classifications,
        ));
    }
    groups.iter().map(validate).collect()
}

fn parse_thresholds(settings: &ClassificationSettings) -> Result<Vec<f64>, ValidationError> {
    settings
        .custom_threshold_tokens()
        .into_iter()
        .map(|token| token.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| {
            ValidationError::new(
                "Custom thresholds must be a comma-separated list of numbers (example: \"1.0, 2.3, 4.5\")",
                Setting::CustomThresholds,
            )
        })
}

fn threshold_source(value: f64, measurement: Option<&str>) -> ThresholdSource {
    match measurement.map(str::trim) {
        Some(feature) if !feature.is_empty() => ThresholdSource::Image(feature.to_string()),
        _ => ThresholdSource::Fixed(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ClassificationSettings {
        ClassificationSettings {
            measurement: "AreaShape_Area".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_validate() {
        let spec = validate(&settings()).unwrap();
        assert_eq!(spec.number_of_bins(), 3);
        assert_eq!(spec.low_threshold, ThresholdSource::Fixed(0.0));
        assert!(spec.bin_names.is_none());
    }

    #[test]
    fn zero_bins_points_at_bin_count() {
        let mut s = settings();
        s.bin_count = 0;
        let err = validate(&s).unwrap_err();
        assert_eq!(err.setting, Setting::BinCount);
    }

    #[test]
    fn single_custom_threshold_without_catch_bins_has_no_bins() {
        let mut s = settings();
        s.bin_choice = BinSpacing::Custom;
        s.custom_thresholds = "5".to_string();
        let err = validate(&s).unwrap_err();
        assert_eq!(err.setting, Setting::CustomThresholds);
    }

    #[test]
    fn image_measurement_overrides_static_threshold() {
        let mut s = settings();
        s.high_threshold_measurement = Some("Threshold_Otsu".to_string());
        s.high_threshold = -5.0;
        let spec = validate(&s).unwrap();
        assert_eq!(
            spec.high_threshold,
            ThresholdSource::Image("Threshold_Otsu".to_string())
        );
    }
}
