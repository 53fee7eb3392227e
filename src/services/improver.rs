//! Prompt improver service
//!
//! Rewrites a user's prompt into a clearer, more specific one for either a
//! text or an image model. Stateless apart from a success counter.

use crate::config::ImproverConfig;
use crate::error::{PrompthashError, Result};
use crate::prompts::{build_improvement_prompt, Target, IMPROVER_SYSTEM_PROMPT};
use crate::providers::{Message, Provider};
use crate::services::{offload, RequestHealth};
use crate::store::RequestCounter;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identity reported by the improver health endpoint
pub const IMPROVER_AGENT_NAME: &str = "prompthash_prompt_improver";

const EMPTY_PROMPT_ERROR: &str = "Please provide a prompt to improve.";
const IMPROVE_ERROR: &str = "Failed to improve prompt. Please try again.";

/// Body of `POST /api/improve`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImproveRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    /// `"image"` or `"text"`; anything else is treated as text
    #[serde(default)]
    pub target: Option<String>,
}

/// Result of an improvement request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImproveResponse {
    pub response: String,
    pub target: Target,
    pub model: String,
    pub error: Option<String>,
}

/// Prompt improvement service
pub struct PromptImproverService {
    provider: Arc<dyn Provider>,
    counter: RequestCounter,
    config: ImproverConfig,
}

impl PromptImproverService {
    /// Creates the improver service
    ///
    /// # Errors
    ///
    /// Returns `PrompthashError::MissingCredentials` when no upstream
    /// provider is available
    pub fn new(provider: Option<Arc<dyn Provider>>, config: ImproverConfig) -> Result<Self> {
        let provider = provider.ok_or_else(|| {
            PrompthashError::MissingCredentials(
                "ASICLOUD_API_KEY is required by the prompt improver".to_string(),
            )
        })?;

        tracing::info!("Prompt improver ready: model={}", config.model);

        Ok(Self {
            provider,
            counter: RequestCounter::new(),
            config,
        })
    }

    /// Improves one prompt
    pub async fn improve(&self, request: ImproveRequest) -> ImproveResponse {
        let target = Target::normalize(request.target.as_deref());
        let prompt = request.prompt.as_deref().unwrap_or_default().trim().to_string();
        let model = self.config.model.clone();

        if prompt.is_empty() {
            return ImproveResponse {
                response: String::new(),
                target,
                model,
                error: Some(EMPTY_PROMPT_ERROR.to_string()),
            };
        }

        let messages = vec![
            Message::system(IMPROVER_SYSTEM_PROMPT),
            Message::user(build_improvement_prompt(&prompt, target)),
        ];
        let provider = Arc::clone(&self.provider);
        let params = self.config.generation();
        let call_model = model.clone();

        tracing::debug!("Improve request: target={}, {} chars", target, prompt.len());

        let completion = offload(async move {
            provider.complete(&call_model, &messages, &params).await
        })
        .await;

        match completion {
            Ok(text) => {
                let total = self.counter.increment();
                tracing::info!("Prompt improved: target={}, total_requests={}", target, total);
                ImproveResponse {
                    response: text.trim().to_string(),
                    target,
                    model,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!("Prompt improvement failed: {:#}", e);
                ImproveResponse {
                    response: String::new(),
                    target,
                    model,
                    error: Some(IMPROVE_ERROR.to_string()),
                }
            }
        }
    }

    /// Reports service identity and the success counter
    pub fn health(&self) -> RequestHealth {
        RequestHealth::ok(IMPROVER_AGENT_NAME, self.counter.get())
    }
}
