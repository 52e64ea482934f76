pub mod binning;
pub mod classifier;
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod manifest;
pub mod palette;
pub mod render;
// cmd and reports are binary modules (see main.rs).

pub use crate::error::{BfResult, BinForgeError, Setting, ValidationError};
