//! Configuration management for the approval finder

use crate::error::{ApprovalFinderError, Result};
use crate::processing::extractor::NameFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

/// Optional bounds on how many words an extracted name may have.
/// Both unset means every pattern match is a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub min_words: Option<usize>,
    pub max_words: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_charts: bool,
    pub chart_width: usize,
    pub report_title: String,
    pub timestamp_filenames: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            show_charts: true,
            chart_width: 40,
            report_title: "Approved Students Report".to_string(),
            timestamp_filenames: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ApprovalFinderError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ApprovalFinderError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("approval-finder")
            .join("config.toml")
    }

    pub fn name_filter(&self) -> NameFilter {
        NameFilter::new(self.matching.min_words, self.matching.max_words)
    }

    fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.matching.min_words, self.matching.max_words) {
            if min > max {
                return Err(ApprovalFinderError::Configuration(format!(
                    "matching.min_words ({}) is greater than matching.max_words ({})",
                    min, max
                )));
            }
        }

        if self.output.chart_width == 0 {
            return Err(ApprovalFinderError::Configuration(
                "output.chart_width must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_text = toml::to_string_pretty(&config).unwrap();

        assert_eq!(Config::from_toml(&toml_text).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml("[matching]\nmin_words = 2\n").unwrap();

        assert_eq!(config.matching.min_words, Some(2));
        assert_eq!(config.matching.max_words, None);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.name_filter(), NameFilter::new(Some(2), None));
    }

    #[test]
    fn test_inverted_word_bounds_are_rejected() {
        let result = Config::from_toml("[matching]\nmin_words = 4\nmax_words = 2\n");

        assert!(matches!(result, Err(ApprovalFinderError::Configuration(_))));
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = Config::from_toml("[output\ncolor_output = yes");

        assert!(matches!(result, Err(ApprovalFinderError::Configuration(_))));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.output.report_title = "Lista de Aprovados".to_string();
        config.output.format = OutputFormat::Json;

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
