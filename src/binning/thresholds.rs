use super::types::{BinSpacing, BinSpec};

/// Bin edges for `spec`, `number_of_bins() + 1` long.
///
/// Even spacing places `bin_count + 1` edges from `low_value` to `high_value`
/// inclusive. Custom spacing uses the configured thresholds as they are.
/// The catch bins add an infinite edge on either end.
pub fn build_thresholds(spec: &BinSpec, low_value: f64, high_value: f64) -> Vec<f64> {
    let mut edges = Vec::with_capacity(spec.number_of_bins() + 1);

    if spec.wants_low_bin {
        edges.push(f64::NEG_INFINITY);
    }

    match spec.spacing {
        BinSpacing::Even => {
            let n = spec.bin_count as f64;
            let width = high_value - low_value;
            edges.extend((0..=spec.bin_count).map(|i| i as f64 * width / n + low_value));
        }
        BinSpacing::Custom => edges.extend_from_slice(&spec.custom_thresholds),
    }

    if spec.wants_high_bin {
        edges.push(f64::INFINITY);
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::ThresholdSource;

    fn even(bin_count: usize, low_bin: bool, high_bin: bool) -> BinSpec {
        BinSpec {
            object_name: "Nuclei".into(),
            measurement: "AreaShape_Area".into(),
            spacing: BinSpacing::Even,
            bin_count,
            low_threshold: ThresholdSource::Fixed(0.0),
            high_threshold: ThresholdSource::Fixed(10.0),
            custom_thresholds: vec![],
            wants_low_bin: low_bin,
            wants_high_bin: high_bin,
            bin_names: None,
            image_name: None,
        }
    }

    #[test]
    fn even_edges_are_inclusive_of_both_thresholds() {
        assert_eq!(build_thresholds(&even(2, false, false), 0.0, 10.0), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn catch_bins_wrap_in_infinities() {
        let edges = build_thresholds(&even(2, true, true), 0.0, 10.0);
        assert_eq!(
            edges,
            vec![f64::NEG_INFINITY, 0.0, 5.0, 10.0, f64::INFINITY]
        );
    }

    #[test]
    fn edge_count_matches_bin_count() {
        for (low, high) in [(false, false), (true, false), (false, true), (true, true)] {
            let spec = even(4, low, high);
            let edges = build_thresholds(&spec, -3.0, 7.0);
            assert_eq!(edges.len() - 1, spec.number_of_bins());
        }
    }

    #[test]
    fn custom_thresholds_pass_through() {
        let mut spec = even(0, false, true);
        spec.spacing = BinSpacing::Custom;
        spec.custom_thresholds = vec![0.3, 1.5, 2.1];
        assert_eq!(
            build_thresholds(&spec, f64::NAN, f64::NAN),
            vec![0.3, 1.5, 2.1, f64::INFINITY]
        );
    }
}
