//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, upload and preview limits,
//! the completion provider, and extractor tuning. The provider API key never
//! lives in the file; it is read from the environment variable named by
//! `llm.api_key_env`.

use docfields_extractor::{ExtractorConfig, ExtractorError};
use docfields_llm::chat::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Environment variable not set
    #[error("Environment variable {0} not set")]
    MissingEnv(String),

    /// Extractor settings are invalid
    #[error(transparent)]
    Extractor(#[from] ExtractorError),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Largest accepted request body, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Pages read for `/parse-pdf-preview`
    #[serde(default = "default_preview_pages")]
    pub preview_pages: usize,

    /// Lines kept in the PDF preview text
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,

    /// Completion provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Extraction and chunking settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Request `response_format: json_object`
    pub json_mode: bool,

    /// HTTP timeout for one completion request (seconds)
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            json_mode: true,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingEnv(self.api_key_env.clone())),
        }
    }

    /// HTTP timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

/// Default upload limit: 10 MiB
fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_preview_pages() -> usize {
    2
}

fn default_preview_lines() -> usize {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_upload_bytes: default_max_upload_bytes(),
            preview_pages: default_preview_pages(),
            preview_lines: default_preview_lines(),
            llm: LlmConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate required fields and nested settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.llm.base_url.is_empty() {
            return Err(ConfigError::MissingField("llm.base_url".to_string()));
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()));
        }
        if self.llm.api_key_env.is_empty() {
            return Err(ConfigError::MissingField("llm.api_key_env".to_string()));
        }
        self.extractor.validate()?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8000);
        assert_eq!(config.preview_pages, 2);
        assert_eq!(config.preview_lines, 20);
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.llm.api_key_env, "DEEPSEEK_API_KEY");
        assert!(config.llm.json_mode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            preview_lines = 5

            [llm]
            base_url = "http://localhost:8080/v1"
            model = "local-model"
            json_mode = false

            [extractor]
            chunk_size = 1000
            chunk_overlap = 250
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.preview_lines, 5);
        assert_eq!(config.preview_pages, 2);
        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert!(!config.llm.json_mode);
        assert_eq!(config.llm.api_key_env, "DEEPSEEK_API_KEY");
        assert_eq!(config.extractor.chunk_size, 1000);
        assert_eq!(config.extractor.chunk_overlap, 250);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.bind_port, 8000);
        assert_eq!(config.extractor, ExtractorConfig::default());
    }

    #[test]
    fn test_invalid_chunking_rejected() {
        let toml = r#"
            [extractor]
            chunk_size = 100
            chunk_overlap = 100
        "#;
        assert!(matches!(
            ServerConfig::from_toml(toml),
            Err(ConfigError::Extractor(ExtractorError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn test_empty_model_rejected() {
        let toml = r#"
            [llm]
            model = ""
        "#;
        assert!(matches!(
            ServerConfig::from_toml(toml),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_port = 7070").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_port, 7070);
    }

    #[test]
    fn test_missing_file() {
        let result = ServerConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_api_key_from_env() {
        let llm = LlmConfig {
            api_key_env: "DOCFIELDS_TEST_API_KEY_PRESENT".to_string(),
            ..Default::default()
        };
        std::env::set_var("DOCFIELDS_TEST_API_KEY_PRESENT", "sk-test");
        assert_eq!(llm.api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_api_key_missing() {
        let llm = LlmConfig {
            api_key_env: "DOCFIELDS_TEST_API_KEY_ABSENT".to_string(),
            ..Default::default()
        };
        assert!(matches!(llm.api_key(), Err(ConfigError::MissingEnv(_))));
    }
}
