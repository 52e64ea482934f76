pub mod classify;
pub mod naming;
pub mod thresholds;
pub mod types;
pub mod validate;

pub use self::classify::{classify, ClassificationResult, UNCLASSIFIED};
pub use self::naming::{bin_feature_names, run_feature_names};
pub use self::thresholds::build_thresholds;
pub use self::types::{BinSpacing, BinSpec, ThresholdSource};
pub use self::validate::{validate, validate_all};
