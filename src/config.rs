//! Naming configuration loaded from TOML
//!
//! Every key is optional:
//!
//! ```toml
//! unique_search_limit = 10000
//! preview_search_limit = 100
//! preview_placeholder = "#"
//! max_name_length = 24
//! considered_stats = ["hp", "st", "ox", "fo", "we", "dm"]
//! replacements_file = "customReplacings.json"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::stats::Stat;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Unknown stat code '{0}' in considered_stats")]
    UnknownStat(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamingConfig {
    /// Most candidates tried for `{n}` when assigning a name
    pub unique_search_limit: u32,
    /// Most candidates tried for `{n}` in previews; 0 shows the placeholder
    pub preview_search_limit: u32,
    pub preview_placeholder: String,
    /// Longest name accepted in game; 0 disables the check
    pub max_name_length: usize,
    /// Stats summed by `topPercent`
    pub considered_stats: Vec<Stat>,
    pub replacements_file: Option<PathBuf>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            unique_search_limit: 10_000,
            preview_search_limit: 100,
            preview_placeholder: "#".to_string(),
            max_name_length: 24,
            considered_stats: vec![
                Stat::Health,
                Stat::Stamina,
                Stat::Oxygen,
                Stat::Food,
                Stat::Weight,
                Stat::MeleeDamage,
            ],
            replacements_file: None,
        }
    }
}

/// TOML structure for deserializing the configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    unique_search_limit: Option<u32>,
    preview_search_limit: Option<u32>,
    preview_placeholder: Option<String>,
    max_name_length: Option<usize>,
    considered_stats: Option<Vec<String>>,
    replacements_file: Option<PathBuf>,
}

impl NamingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// A relative `replacements_file` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        if let (Some(file), Some(dir)) = (&config.replacements_file, path.parent()) {
            if file.is_relative() {
                config.replacements_file = Some(dir.join(file));
            }
        }
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let considered_stats = match parsed.considered_stats {
            Some(codes) => codes
                .iter()
                .map(|code| {
                    Stat::from_code(code).ok_or_else(|| ConfigError::UnknownStat(code.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.considered_stats,
        };

        Ok(NamingConfig {
            unique_search_limit: parsed
                .unique_search_limit
                .unwrap_or(defaults.unique_search_limit),
            preview_search_limit: parsed
                .preview_search_limit
                .unwrap_or(defaults.preview_search_limit),
            preview_placeholder: parsed
                .preview_placeholder
                .unwrap_or(defaults.preview_placeholder),
            max_name_length: parsed.max_name_length.unwrap_or(defaults.max_name_length),
            considered_stats,
            replacements_file: parsed.replacements_file,
        })
    }

    pub fn with_unique_search_limit(mut self, limit: u32) -> Self {
        self.unique_search_limit = limit;
        self
    }

    pub fn with_preview_search_limit(mut self, limit: u32) -> Self {
        self.preview_search_limit = limit;
        self
    }

    pub fn with_preview_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.preview_placeholder = placeholder.into();
        self
    }

    pub fn with_max_name_length(mut self, length: usize) -> Self {
        self.max_name_length = length;
        self
    }

    pub fn with_considered_stats(mut self, stats: Vec<Stat>) -> Self {
        self.considered_stats = stats;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = NamingConfig::from_str("").unwrap();
        assert_eq!(config, NamingConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
unique_search_limit = 500
preview_placeholder = "?"
considered_stats = ["hp", "DM"]
"#;
        let config = NamingConfig::from_str(toml).unwrap();
        assert_eq!(config.unique_search_limit, 500);
        assert_eq!(config.preview_search_limit, 100);
        assert_eq!(config.preview_placeholder, "?");
        assert_eq!(config.considered_stats, vec![Stat::Health, Stat::MeleeDamage]);
    }

    #[test]
    fn test_unknown_stat_code() {
        let result = NamingConfig::from_str(r#"considered_stats = ["hp", "xx"]"#);
        assert!(matches!(result, Err(ConfigError::UnknownStat(code)) if code == "xx"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = NamingConfig::from_str("unique_limit = 5");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
