//! Declares the columns a set of classifications will produce, so the host
//! can build its schema before any image is processed.

use crate::binning::naming::{count_feature, object_feature, percent_feature, M_CATEGORY};
use crate::binning::BinSpec;
use crate::host::IMAGE;
use serde::Serialize;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum ColumnType {
    /// 0/1 membership flags and object counts.
    Integer,
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureColumn {
    /// `Image` or the object set name.
    pub entity: String,
    pub feature: String,
    pub column_type: ColumnType,
}

/// Columns per spec: image counts, image percentages, then per-object flags.
/// `names[i]` are the bin feature names of `specs[i]`.
pub fn measurement_columns(specs: &[BinSpec], names: &[Vec<String>]) -> Vec<FeatureColumn> {
    let mut columns = Vec::new();
    for (spec, bin_names) in specs.iter().zip(names) {
        columns.extend(bin_names.iter().map(|name| FeatureColumn {
            entity: IMAGE.to_string(),
            feature: count_feature(name),
            column_type: ColumnType::Integer,
        }));
        columns.extend(bin_names.iter().map(|name| FeatureColumn {
            entity: IMAGE.to_string(),
            feature: percent_feature(name),
            column_type: ColumnType::Float,
        }));
        columns.extend(bin_names.iter().map(|name| FeatureColumn {
            entity: spec.object_name.clone(),
            feature: object_feature(name),
            column_type: ColumnType::Integer,
        }));
    }
    columns
}

/// Measurement categories produced for `object_name`.
pub fn categories(specs: &[BinSpec], object_name: &str) -> Vec<&'static str> {
    if object_name == IMAGE || specs.iter().any(|s| s.object_name == object_name) {
        vec![M_CATEGORY]
    } else {
        Vec::new()
    }
}

/// Feature names (without the category prefix) produced for `object_name`
/// in `category`, across every spec.
pub fn measurements(
    specs: &[BinSpec],
    names: &[Vec<String>],
    object_name: &str,
    category: &str,
) -> Vec<String> {
    if category != M_CATEGORY {
        return Vec::new();
    }
    let mut result = Vec::new();
    for (spec, bin_names) in specs.iter().zip(names) {
        if object_name == IMAGE {
            for suffix in [
                crate::binning::naming::F_NUM_PER_BIN,
                crate::binning::naming::F_PCT_PER_BIN,
            ] {
                result.extend(bin_names.iter().map(|name| format!("{}_{}", name, suffix)));
            }
        } else if spec.object_name == object_name {
            result.extend(bin_names.iter().cloned());
        }
    }
    result
}
