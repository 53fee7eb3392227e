//! ASI Cloud provider implementation for Prompthash
//!
//! This module implements the Provider trait against ASI Cloud's
//! OpenAI-compatible API: `POST /chat/completions` for generation and
//! `GET /models` for model discovery, both authenticated with a bearer key.

use crate::config::ProviderConfig;
use crate::error::{PrompthashError, Result};
use crate::providers::{GenerationParams, Message, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ASI Cloud API provider
///
/// # Examples
///
/// ```no_run
/// use prompthash::config::ProviderConfig;
/// use prompthash::providers::{AsiProvider, GenerationParams, Message, Provider};
///
/// # async fn example() -> prompthash::error::Result<()> {
/// let config = ProviderConfig {
///     api_key: Some("sk-...".to_string()),
///     ..Default::default()
/// };
/// let provider = AsiProvider::new(&config)?;
/// let params = GenerationParams { temperature: 0.7, top_p: 0.95, max_tokens: 512 };
/// let text = provider
///     .complete("openai/gpt-oss-20b", &[Message::user("Hello!")], &params)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct AsiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
}

/// Response body from `/chat/completions`
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Response body from `/models`
#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

impl AsiProvider {
    /// Create a new ASI provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Provider configuration containing key, base URL and timeout
    ///
    /// # Errors
    ///
    /// Returns `PrompthashError::MissingCredentials` if no API key is set,
    /// or a provider error if the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::config::ProviderConfig;
    /// use prompthash::providers::AsiProvider;
    ///
    /// let missing = AsiProvider::new(&ProviderConfig::default());
    /// assert!(missing.is_err());
    ///
    /// let config = ProviderConfig {
    ///     api_key: Some("sk-test".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(AsiProvider::new(&config).is_ok());
    /// ```
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| PrompthashError::MissingCredentials("ASICLOUD_API_KEY".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("prompthash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                PrompthashError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        tracing::info!("Initialized ASI provider: base_url={}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Get the configured base URL (without trailing slash)
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::config::ProviderConfig;
    /// use prompthash::providers::AsiProvider;
    ///
    /// let config = ProviderConfig {
    ///     api_key: Some("sk-test".to_string()),
    ///     base_url: "http://localhost:9000/v1/".to_string(),
    ///     ..Default::default()
    /// };
    /// let provider = AsiProvider::new(&config).unwrap();
    /// assert_eq!(provider.base_url(), "http://localhost:9000/v1");
    /// ```
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Provider for AsiProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String> {
        let url = self.endpoint("chat/completions");
        let request = CompletionRequest {
            model,
            messages,
            temperature: params.temperature,
            top_p: params.top_p,
            max_tokens: params.max_tokens,
            stream: false,
        };

        tracing::debug!(
            "Sending completion request: model={}, {} messages, max_tokens={}",
            model,
            messages.len(),
            params.max_tokens
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("ASI completion request failed: {}", e);
                PrompthashError::Provider(format!("Completion request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("ASI returned error {}: {}", status, error_text);
            return Err(PrompthashError::Provider(format!(
                "ASI returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse ASI completion response: {}", e);
            PrompthashError::Provider(format!("Failed to parse completion response: {}", e))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PrompthashError::Provider("Completion response contained no text".to_string())
            })?;

        tracing::debug!("Received completion: {} chars", content.len());
        Ok(content.trim().to_string())
    }

    async fn list_models(&self) -> Result<Vec<serde_json::Value>> {
        let url = self.endpoint("models");
        tracing::debug!("Fetching models from ASI: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to fetch ASI models: {}", e);
                PrompthashError::Provider(format!("Failed to connect to ASI: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("ASI returned error {}: {}", status, error_text);
            return Err(PrompthashError::Provider(format!(
                "ASI returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let listing: ModelListResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse ASI models response: {}", e);
            PrompthashError::Provider(format!("Failed to parse models response: {}", e))
        })?;

        tracing::debug!("Fetched {} models from ASI", listing.data.len());
        Ok(listing.data)
    }
}
