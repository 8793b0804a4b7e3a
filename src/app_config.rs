use std::path::Path;
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::language_utils::validate_language_code;
use crate::translation::orchestrator::OrchestratorConfig;
use crate::translation::prompts::PromptContext;
use crate::translation::retry::RetryPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language code (ISO 639-1 or 639-3)
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Quality gate config
    #[serde(default)]
    pub quality: QualityConfig,

    /// Application context injected into prompts
    #[serde(default)]
    pub prompt_context: PromptContext,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// OpenAI-compatible chat completions (OpenAI, Groq, OpenRouter)
    #[default]
    OpenAI,
    /// Anthropic Messages API
    Anthropic,
}

impl BackendProvider {
    /// Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }
}

impl std::fmt::Display for BackendProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for BackendProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Selected provider
    #[serde(default)]
    pub provider: BackendProvider,

    /// Batch and retry settings shared by all providers
    #[serde(default)]
    pub common: CommonConfig,

    /// Model name; empty means the provider default
    #[serde(default = "String::new")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL; empty means the provider's public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: BackendProvider::default(),
            common: CommonConfig::default(),
            model: String::new(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Model to use, falling back to the provider default
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }
        match self.provider {
            BackendProvider::OpenAI => default_openai_model(),
            BackendProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Endpoint to use, falling back to the provider default
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }
        match self.provider {
            BackendProvider::OpenAI => default_openai_endpoint(),
            // The Anthropic client resolves its own public endpoint
            BackendProvider::Anthropic => String::new(),
        }
    }
}

/// Batch and retry settings
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct CommonConfig {
    /// Number of entries per backend call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Attempts allowed for a whole-batch call
    #[serde(default = "default_max_batch_retries")]
    pub max_batch_retries: u32,

    /// Attempts allowed per entry in fallback mode
    #[serde(default = "default_max_single_retries")]
    pub max_single_retries: u32,

    /// Fixed wait between attempts, in seconds
    #[serde(default = "default_retry_wait_secs")]
    pub retry_wait_secs: u64,

    /// Sampling temperature for translation calls
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_batch_retries: default_max_batch_retries(),
            max_single_retries: default_max_single_retries(),
            retry_wait_secs: default_retry_wait_secs(),
            temperature: default_temperature(),
        }
    }
}

/// Quality gate configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct QualityConfig {
    /// Minimum aggregate score to skip human review
    #[serde(default = "default_quality_threshold")]
    pub threshold: f32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            threshold: default_quality_threshold(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to a log crate level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Create a configuration with defaults for the given target language
    pub fn default_config(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            translation: TranslationConfig::default(),
            quality: QualityConfig::default(),
            prompt_context: PromptContext::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid JSON in config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        validate_language_code(&self.target_language)?;

        if self.translation.common.batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }
        if self.translation.common.max_batch_retries == 0 {
            return Err(anyhow!("max_batch_retries must be at least 1"));
        }
        if self.translation.common.max_single_retries == 0 {
            return Err(anyhow!("max_single_retries must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.quality.threshold) {
            return Err(anyhow!(
                "quality threshold must be within [0, 1], got {}",
                self.quality.threshold
            ));
        }
        if !(0.0..=2.0).contains(&self.translation.common.temperature) {
            return Err(anyhow!(
                "temperature must be within [0, 2], got {}",
                self.translation.common.temperature
            ));
        }
        if !self.translation.endpoint.is_empty() {
            url::Url::parse(&self.translation.endpoint).map_err(|e| {
                anyhow!(
                    "Invalid endpoint URL '{}': {}",
                    self.translation.endpoint,
                    e
                )
            })?;
        }
        Ok(())
    }

    /// Retry policy derived from this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_batch_retries: self.translation.common.max_batch_retries,
            max_single_retries: self.translation.common.max_single_retries,
            retry_wait: Duration::from_secs(self.translation.common.retry_wait_secs),
        }
    }

    /// Orchestrator configuration derived from this configuration
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            batch_size: self.translation.common.batch_size,
            retry: self.retry_policy(),
        }
    }
}

fn default_batch_size() -> usize {
    100
}

fn default_max_batch_retries() -> u32 {
    3
}

fn default_max_single_retries() -> u32 {
    3
}

fn default_retry_wait_secs() -> u64 {
    2
}

fn default_temperature() -> f32 {
    0.3
}

fn default_quality_threshold() -> f32 {
    0.8
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}
