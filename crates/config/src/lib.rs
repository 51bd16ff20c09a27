//! Configuration loading, validation, and management for ragent.
//!
//! Loads configuration from `~/.ragent/config.toml` with environment
//! variable overrides. Validates all settings at startup, so a chunking
//! window that cannot advance is rejected before any indexing begins.

use ragent_core::knowledge::window_step;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.ragent/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default chat model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Embedding backend
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Chunking window used by the indexing pipeline
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Where knowledge documents live
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Tool-calling loop limits
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

fn default_provider() -> String {
    "gemini".into()
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
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
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("providers", &self.providers)
            .field("embedding", &self.embedding)
            .field("chunking", &self.chunking)
            .field("knowledge", &self.knowledge)
            .field("dispatch", &self.dispatch)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

/// Which embedder turns chunks and queries into vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackend {
    /// The configured provider's `/embeddings` endpoint
    #[default]
    Provider,
    /// Local feature hashing; no network, lower quality
    Hashing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub backend: EmbeddingBackend,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

fn default_embedding_model() -> String {
    "gemini-embedding-001".into()
}
fn default_dimensions() -> usize {
    1536
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model: default_embedding_model(),
            dimensions: default_dimensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Words per chunk
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Share of each window repeated at the start of the next, 0-100
    #[serde(default = "default_overlap_percent")]
    pub overlap_percent: f64,
}

fn default_window_size() -> usize {
    200
}
fn default_overlap_percent() -> f64 {
    30.0
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            overlap_percent: default_overlap_percent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Folder scanned by `ragent rag`
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// File extensions treated as documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_documents_dir() -> PathBuf {
    AppConfig::config_dir().join("knowledge")
}
fn default_extensions() -> Vec<String> {
    vec!["txt".into(), "md".into()]
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Model round-trips allowed before the loop gives up
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// HTTP timeout for each provider call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_max_iterations() -> u32 {
    25
}
fn default_request_timeout() -> u64 {
    120
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.ragent/config.toml).
    ///
    /// Also checks environment variables for API keys:
    /// - `RAGENT_API_KEY` (highest priority)
    /// - `GEMINI_API_KEY`
    /// - `OPENAI_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
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

    /// Apply environment overrides. `lookup` is `std::env::var` outside tests.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api_key.is_none() {
            self.api_key = lookup("RAGENT_API_KEY")
                .or_else(|| lookup("GEMINI_API_KEY"))
                .or_else(|| lookup("OPENAI_API_KEY"))
                .filter(|key| !key.is_empty());
        }

        if let Some(provider) = lookup("RAGENT_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = lookup("RAGENT_MODEL") {
            self.default_model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ragent")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        window_step(self.chunking.window_size, self.chunking.overlap_percent)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.dispatch.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "dispatch.max_iterations must be at least 1".into(),
            ));
        }

        if self.embedding.dimensions == 0 {
            return Err(ConfigError::ValidationError(
                "embedding.dimensions must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            providers: HashMap::new(),
            embedding: EmbeddingConfig::default(),
            chunking: ChunkingConfig::default(),
            knowledge: KnowledgeConfig::default(),
            dispatch: DispatchConfig::default(),
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
