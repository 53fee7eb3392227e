//! Configuration management for Prompthash
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{PrompthashError, Result};
use crate::providers::GenerationParams;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main configuration structure for Prompthash
///
/// This structure holds all configuration needed by the three services,
/// the upstream provider, and the HTTP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream inference API settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chat service settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Prompt improver service settings
    #[serde(default)]
    pub improver: ImproverConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Base URLs rendered into the chat page
    #[serde(default)]
    pub frontend: FrontendConfig,
}

/// Upstream provider configuration
///
/// Points at an OpenAI-compatible inference API (ASI Cloud by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key for the upstream service
    ///
    /// Usually supplied through `ASICLOUD_API_KEY` rather than the file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API (without trailing endpoint path)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for each upstream request (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://inference.asicloud.cudos.org/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ProviderConfig {
    /// Returns the API key when one is configured and non-blank
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::config::ProviderConfig;
    ///
    /// let mut config = ProviderConfig::default();
    /// assert!(config.api_key().is_none());
    ///
    /// config.api_key = Some("   ".to_string());
    /// assert!(config.api_key().is_none());
    ///
    /// config.api_key = Some("secret".to_string());
    /// assert_eq!(config.api_key(), Some("secret"));
    /// ```
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Chat service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Default model when a request does not name one
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling probability mass
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Maximum tokens generated per reply
    #[serde(default = "default_chat_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_chat_max_tokens() -> u32 {
    512
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_chat_max_tokens(),
        }
    }
}

impl ChatConfig {
    /// Generation parameters sent with every chat completion
    pub fn generation(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}

/// Prompt improver service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImproverConfig {
    /// Model used for every improvement request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling probability mass
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Maximum tokens generated per improved prompt
    #[serde(default = "default_improver_max_tokens")]
    pub max_tokens: u32,
}

fn default_improver_max_tokens() -> u32 {
    400
}

impl Default for ImproverConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_improver_max_tokens(),
        }
    }
}

impl ImproverConfig {
    /// Generation parameters sent with every improvement completion
    pub fn generation(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Base URLs the browser uses to reach each service
///
/// These are only substituted into the chat page; the server never calls them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Chat service base URL
    #[serde(default = "default_agent_api")]
    pub agent_api: String,

    /// Prompt improver service base URL
    #[serde(default = "default_improver_api")]
    pub improver_api: String,

    /// Model listing service base URL
    #[serde(default = "default_models_api")]
    pub models_api: String,
}

fn default_agent_api() -> String {
    "http://127.0.0.1:8010".to_string()
}

fn default_improver_api() -> String {
    "http://127.0.0.1:8011".to_string()
}

fn default_models_api() -> String {
    "http://127.0.0.1:8012".to_string()
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            agent_api: default_agent_api(),
            improver_api: default_improver_api(),
            models_api: default_models_api(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PrompthashError::Config(format!("Failed to read config file: {}", e)))?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var("ASICLOUD_API_KEY") {
            if api_key.trim().is_empty() {
                tracing::debug!("ASICLOUD_API_KEY is set but empty; ignoring");
            } else {
                self.provider.api_key = Some(api_key);
            }
        }

        if let Ok(base_url) = std::env::var("ASICLOUD_BASE_URL") {
            self.provider.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("PROMPTHASH_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid PROMPTHASH_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(model) = std::env::var("PROMPT_AGENT_MODEL") {
            self.chat.model = model;
        }

        if let Ok(model) = std::env::var("PROMPT_IMPROVER_MODEL") {
            self.improver.model = model;
        }

        if let Ok(bind) = std::env::var("PROMPTHASH_BIND") {
            self.server.bind = bind;
        }

        if let Ok(agent_api) = std::env::var("ASI_AGENT_API") {
            self.frontend.agent_api = agent_api;
        }

        if let Ok(improver_api) = std::env::var("ASI_IMPROVER_API") {
            self.frontend.improver_api = improver_api;
        }

        if let Ok(models_api) = std::env::var("ASI_MODELS_API") {
            self.frontend.models_api = models_api;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let crate::cli::Commands::Serve {
            bind: Some(bind), ..
        } = &cli.command
        {
            tracing::debug!("Using bind override from CLI: {}", bind);
            self.server.bind = bind.clone();
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set. A missing API key is
    /// not a validation failure: the chat and improver services refuse
    /// to start without one, while model listing reports it per request.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let base_url = url::Url::parse(&self.provider.base_url).map_err(|e| {
            PrompthashError::Config(format!(
                "provider.base_url is not a valid URL ({}): {}",
                self.provider.base_url, e
            ))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(PrompthashError::Config(format!(
                "provider.base_url must use http or https, got: {}",
                base_url.scheme()
            ))
            .into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(PrompthashError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.model.trim().is_empty() {
            return Err(PrompthashError::Config("chat.model cannot be empty".to_string()).into());
        }

        if self.improver.model.trim().is_empty() {
            return Err(
                PrompthashError::Config("improver.model cannot be empty".to_string()).into(),
            );
        }

        validate_generation("chat", &self.chat.generation())?;
        validate_generation("improver", &self.improver.generation())?;

        self.server.bind.parse::<SocketAddr>().map_err(|e| {
            PrompthashError::Config(format!(
                "server.bind is not a valid socket address ({}): {}",
                self.server.bind, e
            ))
        })?;

        Ok(())
    }
}

fn validate_generation(section: &str, params: &GenerationParams) -> Result<()> {
    if params.max_tokens == 0 {
        return Err(PrompthashError::Config(format!(
            "{}.max_tokens must be greater than 0",
            section
        ))
        .into());
    }

    if !(0.0..=2.0).contains(&params.temperature) {
        return Err(PrompthashError::Config(format!(
            "{}.temperature must be between 0.0 and 2.0",
            section
        ))
        .into());
    }

    if params.top_p <= 0.0 || params.top_p > 1.0 {
        return Err(PrompthashError::Config(format!(
            "{}.top_p must be greater than 0.0 and at most 1.0",
            section
        ))
        .into());
    }

    Ok(())
}
