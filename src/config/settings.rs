//! Split policy settings loaded from config.toml
//!
//! Every field has a default, so a missing file or a missing `[split]` table
//! yields a working configuration.

use crate::{
    core::money::TaxType,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    /// Cost aggregation policy
    #[serde(default)]
    pub split: SplitSettings,
}

/// How totals are rounded and reconciled.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SplitSettings {
    /// Allowed difference per friend between the computed totals and the
    /// receipt total before a mismatch is reported
    pub reconciliation_tolerance: f64,
    /// Add the rounding leftover to the last friend so totals match exactly
    pub assign_remainder_to_last: bool,
    /// Tax type used when a receipt is created without one
    pub default_tax_type: TaxType,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            reconciliation_tolerance: 0.01,
            assign_remainder_to_last: true,
            default_tax_type: TaxType::Amount,
        }
    }
}

impl SplitSettings {
    fn validate(&self) -> Result<()> {
        if !self.reconciliation_tolerance.is_finite() || self.reconciliation_tolerance < 0.0 {
            return Err(Error::Config {
                message: format!(
                    "reconciliation_tolerance must be a non-negative number, got {}",
                    self.reconciliation_tolerance
                ),
            });
        }
        Ok(())
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.split.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid, or a
/// value is out of range.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `CONFIG_PATH` (default `./config.toml`), falling back
/// to defaults when the file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        info!("No config file at {path}, using default split settings");
        return Ok(AppConfig::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_split_settings() {
        let toml_str = r#"
            [split]
            reconciliation_tolerance = 0.05
            assign_remainder_to_last = false
            default_tax_type = "percentage"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.split.reconciliation_tolerance, 0.05);
        assert!(!config.split.assign_remainder_to_last);
        assert_eq!(config.split.default_tax_type, TaxType::Percentage);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = parse_config("[split]\nassign_remainder_to_last = false\n").unwrap();
        assert_eq!(config.split.reconciliation_tolerance, 0.01);
        assert!(!config.split.assign_remainder_to_last);
        assert_eq!(config.split.default_tax_type, TaxType::Amount);

        let empty = parse_config("").unwrap();
        assert_eq!(empty.split, SplitSettings::default());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let result = parse_config("[split]\nreconciliation_tolerance = -1.0\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_unknown_tax_type_rejected() {
        let result = parse_config("[split]\ndefault_tax_type = \"bogus\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
