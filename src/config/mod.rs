//! Configuration management for Recollect
//!
//! Loads the engine configuration from TOML, applies environment overrides
//! and validates the result before the engine sees it.

use crate::error::{RecollectError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Optional TOML pattern table replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns_file: Option<PathBuf>,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub response: ResponseConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Relevance scoring and cutoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub relevance_threshold: f32,
    pub keyword_weight: f32,
    pub entity_weight: f32,
    pub max_results: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: 0.3,
            keyword_weight: 0.6,
            entity_weight: 0.4,
            max_results: 5,
        }
    }
}

/// Answer composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    pub summary_preview_chars: usize,
    pub default_preview_chars: usize,
    pub max_extracted_sentences: usize,
    pub suggestion_count: usize,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            summary_preview_chars: 200,
            default_preview_chars: 150,
            max_extracted_sentences: 3,
            suggestion_count: 3,
        }
    }
}

/// Filter presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Window shown when the query names no date
    pub display_window_days: u32,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            display_window_days: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RecollectError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| RecollectError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: EngineConfig = toml::from_str(&content)?;

        config.apply_env_overrides();
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Defaults plus environment overrides, for when no config file exists
    pub fn from_env() -> Result<Self> {
        Self::from_overrides(std::env::vars())
    }

    /// Defaults plus the given overrides, validated like a loaded file
    pub fn from_overrides<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();
        config.apply_overrides(vars);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RecollectError::Io {
                source: e,
                context: format!("Failed to create config directory: {:?}", parent),
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| RecollectError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: RECOLLECT_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::vars());
    }

    /// Apply overrides from arbitrary (key, value) pairs
    pub fn apply_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix("RECOLLECT_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "RANKING__RELEVANCE_THRESHOLD" => {
                self.ranking.relevance_threshold = parse(path, value)?;
            }
            "RANKING__KEYWORD_WEIGHT" => {
                self.ranking.keyword_weight = parse(path, value)?;
            }
            "RANKING__ENTITY_WEIGHT" => {
                self.ranking.entity_weight = parse(path, value)?;
            }
            "RANKING__MAX_RESULTS" => {
                self.ranking.max_results = parse(path, value)?;
            }
            "RESPONSE__SUGGESTION_COUNT" => {
                self.response.suggestion_count = parse(path, value)?;
            }
            "FILTERS__DISPLAY_WINDOW_DAYS" => {
                self.filters.display_window_days = parse(path, value)?;
            }
            "ANALYTICS__ENABLED" => {
                self.analytics.enabled = parse(path, value)?;
            }
            "PATTERNS_FILE" => {
                self.patterns_file = Some(PathBuf::from(value));
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            RecollectError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("recollect").join("config.toml"))
    }
}

fn parse<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RecollectError::InvalidConfigValue {
            path: path.to_string(),
            message: format!("Cannot parse '{}'", value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.ranking.relevance_threshold, 0.3);
        assert_eq!(config.ranking.max_results, 5);
        assert_eq!(config.response.summary_preview_chars, 200);
        assert_eq!(config.filters.display_window_days, 30);
        assert!(config.analytics.enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = EngineConfig::default();
        config.ranking.max_results = 3;
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded.ranking.max_results, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[ranking]\nrelevance_threshold = 0.5\nkeyword_weight = 0.6\nentity_weight = 0.4\nmax_results = 2\n").unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded.ranking.relevance_threshold, 0.5);
        assert_eq!(loaded.response.suggestion_count, 3);
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::load(Path::new("/nonexistent/recollect.toml"));
        assert!(matches!(result, Err(RecollectError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_overrides() {
        let mut config = EngineConfig::default();
        config.apply_overrides(vec![
            ("RECOLLECT_RANKING__MAX_RESULTS".to_string(), "8".to_string()),
            ("RECOLLECT_ANALYTICS__ENABLED".to_string(), "false".to_string()),
            ("RECOLLECT_RANKING__KEYWORD_WEIGHT".to_string(), "lots".to_string()),
            ("UNRELATED".to_string(), "1".to_string()),
        ]);

        assert_eq!(config.ranking.max_results, 8);
        assert!(!config.analytics.enabled);
        // Unparseable values are ignored
        assert_eq!(config.ranking.keyword_weight, 0.6);
    }

    #[test]
    fn test_env_only_config_is_validated() {
        let config = EngineConfig::from_overrides(vec![(
            "RECOLLECT_RANKING__MAX_RESULTS".to_string(),
            "3".to_string(),
        )])
        .unwrap();
        assert_eq!(config.ranking.max_results, 3);

        for (key, value) in [
            ("RECOLLECT_RANKING__MAX_RESULTS", "0"),
            ("RECOLLECT_RESPONSE__SUGGESTION_COUNT", "9"),
            ("RECOLLECT_FILTERS__DISPLAY_WINDOW_DAYS", "4000000000"),
        ] {
            let result =
                EngineConfig::from_overrides(vec![(key.to_string(), value.to_string())]);
            assert!(
                matches!(result, Err(RecollectError::ConfigValidation { .. })),
                "{} = {} should be rejected",
                key,
                value
            );
        }
    }
}
