//! TOML configuration file support.
//!
//! Every section and key is optional:
//!
//! ```toml
//! # pfile-classify.toml
//! [parser]
//! skip_blank_lines = true
//! convert_dates = true
//!
//! [pairing]
//! policy = "reject-ambiguous"   # or "last-match", "skip-ambiguous"
//!
//! [measurement]
//! default = "unknown"
//!
//! [[measurement.rules]]
//! pattern = "fmri"
//! label = "functional"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use pfile_classifier::acquisition::PairPolicy;
use pfile_classifier::classify::LabelTable;
use pfile_classifier::efile::ParserOptions;
use pfile_classifier::pipeline::ClassifierOptions;

/// Root configuration structure for pfile-classify.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// E-file parser switches.
    #[serde(default)]
    pub parser: ParserOptions,

    /// Pair matching settings.
    #[serde(default)]
    pub pairing: PairingConfig,

    /// Series description to measurement rules.
    #[serde(default)]
    pub measurement: LabelTable,
}

/// Configuration for E-file/P-file pair matching.
#[derive(Debug, Default, Deserialize)]
pub struct PairingConfig {
    /// Tie policy for acquisitions with several candidates.
    #[serde(default)]
    pub policy: PairPolicy,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load from `path` if given, else use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Options for a classification run.
    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            parser: self.parser,
            policy: self.pairing.policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [parser]
            skip_blank_lines = false
            convert_dates = false

            [pairing]
            policy = "last-match"

            [measurement]
            default = "other"

            [[measurement.rules]]
            pattern = "fmri"
            label = "functional"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(!config.parser.skip_blank_lines);
        assert!(!config.parser.convert_dates);
        assert_eq!(config.pairing.policy, PairPolicy::LastMatch);
        assert_eq!(config.measurement.rules.len(), 1);
        assert_eq!(config.measurement.default.as_str(), "other");
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [pairing]
            policy = "skip-ambiguous"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.pairing.policy, PairPolicy::SkipAmbiguous);
        assert!(config.parser.skip_blank_lines);
        assert!(config.measurement.rules.is_empty());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.classifier_options(), ClassifierOptions::default());
        assert_eq!(config.measurement.default.as_str(), "unknown");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(Config::from_str("[pairing]\npolicy = \"first\"\n").is_err());
    }
}
