//! Recomatch configuration module
//!
//! A single JSON config file (`.recomatch.json`) in the data directory
//! controls the matching strategy, its thresholds, the admission rule and
//! the registry location. Missing file or missing keys fall back to
//! defaults; a broken file is reported and ignored.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = ".recomatch.json";
pub const CONFIG_VERSION: u32 = 1;

/// Default Model2Vec model ID (multilingual: program and course names are
/// frequently not in English).
pub const DEFAULT_MODEL_ID: &str = "minishlab/potion-multilingual-128M";

pub const DEFAULT_REGISTRY_FILE: &str = "recognitions.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Text encoding strategy, selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Dense neural embeddings (Model2Vec). Corpus vectors are encoded once
    /// per session and reused across queries.
    Embedding,
    /// Sparse TF-IDF weighting fit jointly over the query and the corpus.
    /// Corpus vectors are refit on every query.
    Lexical,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Embedding => "embedding",
            Strategy::Lexical => "lexical",
        }
    }
}

/// Matching thresholds and the admission rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,

    /// Per-field admission threshold under the embedding strategy.
    #[serde(default = "default_embedding_threshold")]
    pub embedding_threshold: f32,

    /// Per-field admission threshold under the lexical strategy.
    #[serde(default = "default_lexical_threshold")]
    pub lexical_threshold: f32,

    /// Minimum number of fields that must exceed the threshold for a record
    /// to be retained. Requiring all three is too strict (program and
    /// institution names are entered inconsistently); requiring one is too
    /// permissive.
    #[serde(default = "default_min_field_matches")]
    pub min_field_matches: usize,
}

fn default_strategy() -> Strategy {
    Strategy::Embedding
}

fn default_embedding_threshold() -> f32 {
    0.5
}

fn default_lexical_threshold() -> f32 {
    0.3
}

fn default_min_field_matches() -> usize {
    2
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            embedding_threshold: default_embedding_threshold(),
            lexical_threshold: default_lexical_threshold(),
            min_field_matches: default_min_field_matches(),
        }
    }
}

impl MatchingConfig {
    /// Threshold in effect for the configured strategy.
    pub fn threshold(&self) -> f32 {
        match self.strategy {
            Strategy::Embedding => self.embedding_threshold,
            Strategy::Lexical => self.lexical_threshold,
        }
    }
}

/// Embedding model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Local model directory; takes precedence over `model_id` when set.
    #[serde(default)]
    pub model_path: Option<String>,
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            model_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_file")]
    pub file: String,
}

fn default_registry_file() -> String {
    DEFAULT_REGISTRY_FILE.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            file: default_registry_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            matching: MatchingConfig::default(),
            model: ModelConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if config_path.exists() {
            match Self::load_from_file(&config_path) {
                Ok(config) => {
                    if config.version > CONFIG_VERSION {
                        eprintln!(
                            "Warning: Config version {} is newer than supported version {}.",
                            config.version, CONFIG_VERSION
                        );
                    }
                    return config;
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to load {}: {}. Using defaults.",
                        CONFIG_FILE, e
                    );
                }
            }
        }

        Self::default()
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let config_path = root.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Generate default config file content
    pub fn default_json() -> String {
        serde_json::to_string_pretty(&Config::default()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.matching.strategy, Strategy::Embedding);
        assert_eq!(config.matching.min_field_matches, 2);
        assert_eq!(config.registry.file, "recognitions.csv");
    }

    #[test]
    fn test_threshold_follows_strategy() {
        let mut matching = MatchingConfig::default();
        assert_eq!(matching.threshold(), 0.5);

        matching.strategy = Strategy::Lexical;
        assert_eq!(matching.threshold(), 0.3);
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{"matching": {"strategy": "lexical"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.matching.strategy, Strategy::Lexical);
        assert_eq!(config.matching.lexical_threshold, 0.3);
        assert_eq!(config.model.model_id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn test_config_keys_are_snake_case() {
        let json = r#"{"model": {"model_id": "my/model", "model_path": "/models/local"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.model.model_id, "my/model");
        assert_eq!(config.model.model_path.as_deref(), Some("/models/local"));

        let rendered = Config::default_json();
        assert!(rendered.contains("\"model_id\""));
        assert!(rendered.contains("\"min_field_matches\""));
    }

    #[test]
    fn test_default_json_round_trips() {
        let config: Config = serde_json::from_str(&Config::default_json()).unwrap();
        assert_eq!(config.matching.embedding_threshold, 0.5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.matching.strategy = Strategy::Lexical;
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path());
        assert_eq!(loaded.matching.strategy, Strategy::Lexical);
    }
}
