use strum_macros::Display;
use thiserror::Error;

/// The configuration field a validation failure points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Setting {
    Classifications,
    ObjectName,
    Measurement,
    BinCount,
    HighThreshold,
    CustomThresholds,
    BinNames,
}

/// A setup-time configuration problem. Never produced while classifying.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (setting: {setting})")]
pub struct ValidationError {
    pub message: String,
    pub setting: Setting,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, setting: Setting) -> Self {
        Self {
            message: message.into(),
            setting,
        }
    }
}

#[derive(Error, Debug)]
pub enum BinForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Missing measurement '{feature}' for '{entity}'")]
    MissingMeasurement { entity: String, feature: String },

    #[error("Objects '{object_name}' have {expected} objects but {actual} measurement values")]
    ObjectCountMismatch {
        object_name: String,
        expected: usize,
        actual: usize,
    },
}

pub type BfResult<T> = Result<T, BinForgeError>;
