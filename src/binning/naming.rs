use super::types::BinSpec;

pub const M_CATEGORY: &str = "Classify";
pub const F_NUM_PER_BIN: &str = "NumObjectsPerBin";
pub const F_PCT_PER_BIN: &str = "PctObjectsPerBin";

/// Measurement name used inside auto-generated bin names.
///
/// The k-th repeat of a measurement among `prior` siblings (declaration
/// order, first occurrence excluded) gets `k` appended.
pub fn measurement_name(spec: &BinSpec, prior: &[BinSpec]) -> String {
    let duplicates = prior
        .iter()
        .filter(|other| other.measurement == spec.measurement)
        .count();
    if duplicates > 0 {
        format!("{}{}", spec.measurement, duplicates)
    } else {
        spec.measurement.clone()
    }
}

pub fn auto_bin_names(measurement_name: &str, num_bins: usize) -> Vec<String> {
    (0..num_bins)
        .map(|i| format!("{}_Bin_{}", measurement_name, i + 1))
        .collect()
}

/// Splits a comma separated name list, trimming each entry.
pub fn split_names(text: &str) -> Vec<String> {
    text.split(',').map(|name| name.trim().to_string()).collect()
}

/// One feature name per bin in bin order: low catch bin, inner bins, high catch bin.
pub fn bin_feature_names(spec: &BinSpec, prior: &[BinSpec]) -> Vec<String> {
    match &spec.bin_names {
        Some(names) => names.clone(),
        None => auto_bin_names(&measurement_name(spec, prior), spec.number_of_bins()),
    }
}

/// Feature names for every spec of a run, each disambiguated against the
/// specs declared before it.
pub fn run_feature_names(specs: &[BinSpec]) -> Vec<Vec<String>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| bin_feature_names(spec, &specs[..i]))
        .collect()
}

/// Why `name` cannot be used as a column identifier, if it can't.
pub fn feature_name_problem(name: &str) -> Option<String> {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Some("Bin names must not be empty".to_string()),
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Some(format!(
            "Bin name '{}' must start with a letter or an underscore",
            name
        ));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Some(format!(
            "Bin name '{}' contains '{}'. Only letters, digits and underscores are allowed",
            name, bad
        ));
    }
    None
}

pub fn object_feature(bin_name: &str) -> String {
    format!("{}_{}", M_CATEGORY, bin_name)
}

pub fn count_feature(bin_name: &str) -> String {
    format!("{}_{}_{}", M_CATEGORY, bin_name, F_NUM_PER_BIN)
}

pub fn percent_feature(bin_name: &str) -> String {
    format!("{}_{}_{}", M_CATEGORY, bin_name, F_PCT_PER_BIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_name_rules() {
        assert!(feature_name_problem("AreaShape_Area_Bin_1").is_none());
        assert!(feature_name_problem("_private").is_none());
        assert!(feature_name_problem("").is_some());
        assert!(feature_name_problem("1st").is_some());
        assert!(feature_name_problem("Big Cells").is_some());
        assert!(feature_name_problem("small-ish").is_some());
    }

    #[test]
    fn split_names_trims() {
        assert_eq!(split_names(" Small, Medium ,Large"), vec!["Small", "Medium", "Large"]);
    }

    #[test]
    fn column_names() {
        assert_eq!(object_feature("Small"), "Classify_Small");
        assert_eq!(count_feature("Small"), "Classify_Small_NumObjectsPerBin");
        assert_eq!(percent_feature("Small"), "Classify_Small_PctObjectsPerBin");
    }
}
