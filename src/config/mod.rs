//! Configuration module
//!
//! Handles loading and validating settings from YAML files and environment
//! variables.

mod settings;

pub use settings::*;
