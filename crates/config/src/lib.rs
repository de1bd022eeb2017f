//! Configuration loading and validation for MindNest.
//!
//! Loads configuration from `~/.mindnest/config.toml` with environment
//! variable overrides. The only secret is the completion-service API key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.mindnest/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion-service API key (bearer token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible completion endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional request timeout. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Record store configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_api_url() -> String {
    "https://openrouter.ai/api/v1".into()
}
fn default_model() -> String {
    "tngtech/deepseek-r1t2-chimera:free".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("storage", &self.storage)
            .finish()
    }
}

/// Which record store backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One JSON file per key
    #[default]
    File,
    /// A single SQLite database
    Sqlite,
    /// Nothing survives the process (testing)
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StorageBackend::File => "file",
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Where the file/sqlite backends keep their data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Guard each log's read-modify-write append with a lock
    #[serde(default)]
    pub serialize_appends: bool,
}

impl StorageConfig {
    /// The resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| AppConfig::config_dir().join("data"))
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.mindnest/config.toml).
    ///
    /// Also checks environment variables for the API key:
    /// - `MINDNEST_API_KEY` (highest priority)
    /// - `OPENROUTER_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var("MINDNEST_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENROUTER_API_KEY").ok())
                .filter(|k| !k.trim().is_empty());
        }

        if let Ok(model) = std::env::var("MINDNEST_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".mindnest")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError("api_url must not be empty".into()));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("model must not be empty".into()));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be > 0 when set".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            request_timeout_secs: None,
            storage: StorageConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.api_url.contains("openrouter.ai"));
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(!config.storage.serialize_appends);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.storage.backend, config.storage.backend);
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AppConfig {
            request_timeout_secs: Some(0),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_model_rejected() {
        let config = AppConfig {
            model: "  ".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().model, default_model());
    }

    #[test]
    fn storage_section_parsing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_key = "sk-or-test"
model = "some/model"

[storage]
backend = "sqlite"
data_dir = "/var/lib/mindnest"
serialize_appends = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-or-test"));
        assert_eq!(config.model, "some/model");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.data_dir(), PathBuf::from("/var/lib/mindnest"));
        assert!(config.storage.serialize_appends);
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\nbackend = \"cloud\"").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("sk-or-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-or-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("openrouter.ai"));
        assert!(toml_str.contains("backend = \"file\""));
        assert!(!toml_str.contains("api_key"));
    }
}
