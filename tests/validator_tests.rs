mod common;

use binforge::binning::{validate, validate_all, BinSpacing, ThresholdSource};
use binforge::config::ClassificationSettings;
use binforge::Setting;
use common::{custom_settings, even_settings};
use rstest::rstest;

#[test]
fn custom_name_count_mismatch_points_at_names() {
    let mut s = even_settings(3, 0.0, 1.0);
    s.bin_names = Some("Small,Large".to_string());

    let err = validate(&s).unwrap_err();
    assert_eq!(err.setting, Setting::BinNames);
    assert!(err.message.contains("(2)"), "{}", err.message);
    assert!(err.message.contains("(3)"), "{}", err.message);
}

#[test]
fn non_numeric_custom_thresholds_point_at_thresholds() {
    let err = validate(&custom_settings("a,b,c")).unwrap_err();
    assert_eq!(err.setting, Setting::CustomThresholds);
    assert!(err.message.contains("comma-separated list of numbers"));
}

#[rstest]
#[case(BinSpacing::Even, Setting::BinCount)]
#[case(BinSpacing::Custom, Setting::CustomThresholds)]
fn no_bins_points_at_the_spacing_setting(#[case] spacing: BinSpacing, #[case] expected: Setting) {
    let s = ClassificationSettings {
        measurement: "AreaShape_Area".to_string(),
        bin_choice: spacing,
        bin_count: 0,
        custom_thresholds: "1".to_string(),
        ..Default::default()
    };
    assert_eq!(validate(&s).unwrap_err().setting, expected);
}

#[test]
fn catch_bins_alone_are_enough() {
    let mut s = custom_settings("7.5");
    s.wants_low_bin = true;
    s.wants_high_bin = true;

    let spec = validate(&s).unwrap();
    assert_eq!(spec.number_of_bins(), 2);
}

#[rstest]
#[case("Small, Medium, Large", true)]
#[case("Small,Medium,Large", true)]
#[case("small_1,_medium,LARGE", true)]
#[case("Small,Medium,", false)]
#[case("Small,Med ium,Large", false)]
#[case("Small,2Medium,Large", false)]
#[case("Small,Medium-ish,Large", false)]
fn custom_names_must_be_identifiers(#[case] names: &str, #[case] ok: bool) {
    let mut s = even_settings(3, 0.0, 1.0);
    s.bin_names = Some(names.to_string());

    match validate(&s) {
        Ok(spec) => {
            assert!(ok, "expected '{}' to be rejected", names);
            assert_eq!(spec.bin_names.unwrap().len(), 3);
        }
        Err(err) => {
            assert!(!ok, "expected '{}' to pass: {}", names, err);
            assert_eq!(err.setting, Setting::BinNames);
        }
    }
}

#[test]
fn auto_names_inherit_measurement_validity() {
    let mut s = even_settings(2, 0.0, 1.0);
    s.measurement = "Intensity.Mean".to_string();
    assert_eq!(validate(&s).unwrap_err().setting, Setting::BinNames);
}

#[test]
fn names_are_checked_before_thresholds() {
    let mut s = custom_settings("a,b");
    s.bin_names = Some("One,Two".to_string());
    assert_eq!(validate(&s).unwrap_err().setting, Setting::BinNames);
}

#[rstest]
#[case(1.0, 1.0)]
#[case(2.0, 1.0)]
fn even_high_must_exceed_low(#[case] low: f64, #[case] high: f64) {
    let err = validate(&even_settings(2, low, high)).unwrap_err();
    assert_eq!(err.setting, Setting::HighThreshold);
}

#[test]
fn image_based_thresholds_skip_ordering_check() {
    let mut s = even_settings(2, 5.0, 1.0);
    s.low_threshold_measurement = Some("Threshold_Low".to_string());

    let spec = validate(&s).unwrap();
    assert_eq!(
        spec.low_threshold,
        ThresholdSource::Image("Threshold_Low".to_string())
    );
    assert_eq!(spec.high_threshold, ThresholdSource::Fixed(1.0));
}

#[rstest]
#[case("0,2,1")]
#[case("0,1,1")]
#[case("0,nan,2")]
fn custom_thresholds_must_increase(#[case] text: &str) {
    let err = validate(&custom_settings(text)).unwrap_err();
    assert_eq!(err.setting, Setting::CustomThresholds);
}

#[test]
fn missing_measurement_is_rejected() {
    let mut s = even_settings(2, 0.0, 1.0);
    s.measurement = String::new();
    assert_eq!(validate(&s).unwrap_err().setting, Setting::Measurement);
}

#[rstest]
#[case("Dim,Dim")]
#[case("Dim , Dim")]
fn repeated_bin_names_point_at_names(#[case] names: &str) {
    let mut s = custom_settings("0,1,2");
    s.bin_names = Some(names.to_string());

    let err = validate(&s).unwrap_err();
    assert_eq!(err.setting, Setting::BinNames);
    assert!(err.message.contains("\"Dim\""), "{}", err.message);
}

#[test]
fn validate_all_stops_at_first_failure() {
    let good = even_settings(2, 0.0, 1.0);
    let bad = custom_settings("x,y");
    let mut worse = even_settings(2, 0.0, 1.0);
    worse.bin_names = Some("A".to_string());

    let err = validate_all(&[good.clone(), bad, worse]).unwrap_err();
    assert_eq!(err.setting, Setting::CustomThresholds);

    assert_eq!(validate_all(&[good.clone(), good]).unwrap().len(), 2);
}

#[test]
fn empty_pipeline_is_rejected() {
    assert_eq!(validate_all(&[]).unwrap_err().setting, Setting::Classifications);
}

#[test]
fn error_display_names_the_setting() {
    let err = validate(&custom_settings("a,b,c")).unwrap_err();
    assert!(err.to_string().ends_with("(setting: custom_thresholds)"));
}

#[test]
fn converts_into_crate_error() {
    let err: binforge::BinForgeError = validate(&custom_settings("a,b,c")).unwrap_err().into();
    assert!(matches!(err, binforge::BinForgeError::Validation(_)));
    assert!(err.to_string().starts_with("Validation Error: Custom thresholds"));
}
