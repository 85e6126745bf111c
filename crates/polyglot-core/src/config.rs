use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::language;
use crate::model::GenerationParams;

/// Environment variable that overrides `models.api_token`.
pub const API_TOKEN_ENV: &str = "POLYGLOT_API_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub summarization: SummarizationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the web UI binds to
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted PDF upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Base URL of the inference service hosting the pretrained models
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer token for the inference service
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_translation_model")]
    pub translation_model: String,
    #[serde(default = "default_summarization_model")]
    pub summarization_model: String,
    /// Request timeout in seconds (0 = wait for generation to finish)
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_token: None,
            translation_model: default_translation_model(),
            summarization_model: default_summarization_model(),
            request_timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Input is truncated to this many tokens before generation
    #[serde(default = "default_translation_max_input_tokens")]
    pub max_input_tokens: usize,
    /// Source language preselected in the UI (code or name)
    #[serde(default = "default_source_language")]
    pub default_source: String,
    /// Target language preselected in the UI (code or name)
    #[serde(default = "default_target_language")]
    pub default_target: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: default_translation_max_input_tokens(),
            default_source: default_source_language(),
            default_target: default_target_language(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizationConfig {
    /// Input is truncated to this many tokens before generation
    #[serde(default = "default_summarization_max_input_tokens")]
    pub max_input_tokens: usize,
    /// Extracted document text is cut to this many characters
    #[serde(default = "default_document_char_limit")]
    pub document_char_limit: usize,
    /// Minimum summary length in tokens
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Maximum summary length in tokens
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_num_beams")]
    pub num_beams: usize,
    #[serde(default = "default_length_penalty")]
    pub length_penalty: f32,
    #[serde(default = "default_true")]
    pub early_stopping: bool,
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: default_summarization_max_input_tokens(),
            document_char_limit: default_document_char_limit(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            num_beams: default_num_beams(),
            length_penalty: default_length_penalty(),
            early_stopping: default_true(),
        }
    }
}

impl SummarizationConfig {
    /// Beam search parameters handed to the summarization model
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            num_beams: Some(self.num_beams),
            length_penalty: Some(self.length_penalty),
            min_length: Some(self.min_length),
            max_length: Some(self.max_length),
            early_stopping: Some(self.early_stopping),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_translation_model() -> String {
    "facebook/m2m100_418M".to_string()
}

fn default_summarization_model() -> String {
    "facebook/bart-large-cnn".to_string()
}

fn default_translation_max_input_tokens() -> usize {
    512
}

fn default_source_language() -> String {
    language::DEFAULT_SOURCE.to_string()
}

fn default_target_language() -> String {
    language::DEFAULT_TARGET.to_string()
}

fn default_summarization_max_input_tokens() -> usize {
    1024
}

fn default_document_char_limit() -> usize {
    4096
}

fn default_min_length() -> usize {
    50
}

fn default_max_length() -> usize {
    150
}

fn default_num_beams() -> usize {
    4
}

fn default_length_penalty() -> f32 {
    2.0
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        if let Ok(token) = std::env::var(API_TOKEN_ENV) {
            if !token.trim().is_empty() {
                config.models.api_token = Some(token);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/polyglot/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("polyglot")
            .join("config.toml")
    }

    /// Check values that serde defaults cannot guard
    pub fn validate(&self) -> crate::Result<()> {
        url::Url::parse(&self.models.endpoint)
            .map_err(|e| crate::Error::Config(format!("invalid models.endpoint: {}", e)))?;

        for (key, value) in [
            ("translation.default_source", &self.translation.default_source),
            ("translation.default_target", &self.translation.default_target),
        ] {
            language::resolve(value)
                .map_err(|e| crate::Error::Config(format!("{}: {}", key, e)))?;
        }

        let s = &self.summarization;
        if s.min_length > s.max_length {
            return Err(crate::Error::Config(format!(
                "summarization.min_length ({}) exceeds summarization.max_length ({})",
                s.min_length, s.max_length
            )));
        }
        if s.num_beams == 0 {
            return Err(crate::Error::Config(
                "summarization.num_beams must be at least 1".to_string(),
            ));
        }
        if s.document_char_limit == 0 {
            return Err(crate::Error::Config(
                "summarization.document_char_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_model_settings() {
        let config = AppConfig::default();
        assert_eq!(config.models.translation_model, "facebook/m2m100_418M");
        assert_eq!(config.models.summarization_model, "facebook/bart-large-cnn");
        assert_eq!(config.translation.max_input_tokens, 512);
        assert_eq!(config.summarization.max_input_tokens, 1024);
        assert_eq!(config.summarization.document_char_limit, 4096);

        let params = config.summarization.generation_params();
        assert_eq!(params.num_beams, Some(4));
        assert_eq!(params.length_penalty, Some(2.0));
        assert_eq!(params.min_length, Some(50));
        assert_eq!(params.max_length, Some(150));
        assert_eq!(params.early_stopping, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [models]
            endpoint = "https://inference.example.com/v1"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.models.endpoint, "https://inference.example.com/v1");
        assert_eq!(config.summarization.num_beams, 4);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.models.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.translation.default_target = "tlh".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.summarization.min_length = 200;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.summarization.num_beams = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("polyglot-missing-config").join("config.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8501);
    }
}
