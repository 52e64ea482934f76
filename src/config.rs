use crate::binning::BinSpacing;
use crate::error::{BfResult, BinForgeError};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// One classification group as the user enters it. Text fields are kept
/// verbatim; `binning::validate` turns them into a typed `BinSpec`.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassificationSettings {
    #[arg(long, default_value = "Nuclei")]
    pub object_name: String,
    #[arg(long, default_value = "")]
    pub measurement: String,

    #[arg(long, default_value = "even")]
    pub bin_choice: BinSpacing,
    #[arg(long, default_value_t = 3)]
    pub bin_count: usize,

    // === THRESHOLDS (Even spacing) ===
    #[arg(long, default_value_t = 0.0)]
    pub low_threshold: f64,
    /// Image measurement used instead of `low_threshold` when set.
    #[arg(long)]
    pub low_threshold_measurement: Option<String>,
    #[arg(long, default_value_t = 1.0)]
    pub high_threshold: f64,
    /// Image measurement used instead of `high_threshold` when set.
    #[arg(long)]
    pub high_threshold_measurement: Option<String>,

    // === CATCH BINS ===
    #[arg(long, default_value_t = false)]
    pub wants_low_bin: bool,
    #[arg(long, default_value_t = false)]
    pub wants_high_bin: bool,

    // === CUSTOM SPACING ===
    #[arg(long, default_value = "0,1")]
    pub custom_thresholds: String,

    // === OUTPUT ===
    /// Comma separated bin names. Auto-generated when absent.
    #[arg(long)]
    pub bin_names: Option<String>,
    /// Retain a color-coded image of the classified objects under this name.
    #[arg(long)]
    pub image_name: Option<String>,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            object_name: "Nuclei".to_string(),
            measurement: String::new(),
            bin_choice: BinSpacing::Even,
            bin_count: 3,
            low_threshold: 0.0,
            low_threshold_measurement: None,
            high_threshold: 1.0,
            high_threshold_measurement: None,
            wants_low_bin: false,
            wants_high_bin: false,
            custom_thresholds: "0,1".to_string(),
            bin_names: None,
            image_name: None,
        }
    }
}

impl ClassificationSettings {
    pub fn wants_custom_names(&self) -> bool {
        self.bin_names.is_some()
    }

    /// Raw custom threshold tokens, trimmed.
    pub fn custom_threshold_tokens(&self) -> Vec<&str> {
        self.custom_thresholds.split(',').map(str::trim).collect()
    }

    /// Total number of bins, counting the optional catch bins. Custom
    /// spacing counts tokens, so it is defined even for unparsable text.
    pub fn number_of_bins(&self) -> i64 {
        let mut value = match self.bin_choice {
            BinSpacing::Even => self.bin_count as i64,
            BinSpacing::Custom => self.custom_thresholds.split(',').count() as i64 - 1,
        };
        if self.wants_low_bin {
            value += 1;
        }
        if self.wants_high_bin {
            value += 1;
        }
        value
    }
}

/// Every classification performed in one run, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub classifications: Vec<ClassificationSettings>,
}

impl PipelineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&content)?;

        if config.classifications.is_empty() {
            return Err(BinForgeError::Config(format!(
                "Pipeline '{}' defines no classifications",
                path.display()
            )));
        }

        info!(
            "Loaded {} classification(s) from {}",
            config.classifications.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn single(settings: ClassificationSettings) -> Self {
        Self {
            classifications: vec![settings],
        }
    }
}
