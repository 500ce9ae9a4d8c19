//! Configuration loading.
//!
//! Loaded from ~/.config/redline/redline.yml or .redline.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration for Redline.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// LLM gateway settings.
    pub llm: LlmConfig,

    /// Storage settings.
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .redline.yml in current directory
    /// 3. ~/.config/redline/redline.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".redline.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .redline.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .redline.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("redline").join("redline.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.llm.timeout_ms == 0 {
            eyre::bail!("llm.timeout-ms must be > 0");
        }
        if self.llm.model.is_empty() {
            eyre::bail!("llm.model must not be empty");
        }
        if self.llm.base_url.is_empty() {
            eyre::bail!("llm.base-url must not be empty");
        }
        Ok(())
    }

    /// Resolve the SQLite database path, creating parent directories as needed.
    pub fn db_path(&self) -> Result<PathBuf> {
        let path = self.storage.db_path.clone();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .context(format!("Failed to create data directory: {}", parent.display()))?;
            }
        }
        Ok(path)
    }
}

/// LLM gateway settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible chat completions endpoint.
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Model identifier passed through in the request body.
    pub model: String,

    /// Environment variable holding the bearer token.
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Timeout per LLM call in milliseconds.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "REDLINE_API_KEY".to_string(),
            timeout_ms: 120_000, // 2 minutes
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(rename = "db-path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let default_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("redline");

        Self {
            db_path: default_dir.join("redline.db"),
        }
    }
}
