//! Base provider trait and common types for Prompthash
//!
//! This module defines the Provider trait that the upstream completion
//! client implements, along with the message and generation parameter
//! types shared by every service.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message structure for a completion request
///
/// Represents one role-tagged message sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::providers::Message;
    ///
    /// let msg = Message::user("Hello, assistant!");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::providers::Message;
    ///
    /// let msg = Message::assistant("Hello, user!");
    /// assert_eq!(msg.role, "assistant");
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::providers::Message;
    ///
    /// let msg = Message::system("You are a helpful assistant");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Sampling parameters for a single completion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Provider trait for the upstream inference API
///
/// Services hold an `Arc<dyn Provider>` and run each call on a spawned
/// task, so implementations must be `Send + Sync + 'static`.
///
/// # Examples
///
/// ```no_run
/// use prompthash::providers::{GenerationParams, Message, Provider};
/// use prompthash::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn complete(
///         &self,
///         _model: &str,
///         messages: &[Message],
///         _params: &GenerationParams,
///     ) -> Result<String> {
///         Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Requests one non-streaming completion
    ///
    /// # Arguments
    ///
    /// * `model` - Upstream model identifier
    /// * `messages` - Role-tagged prompt messages
    /// * `params` - Sampling parameters
    ///
    /// # Returns
    ///
    /// Returns the generated text, trimmed of surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response has no text
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String>;

    /// List the models exposed by the upstream API
    ///
    /// Items are returned as loosely-typed JSON objects in upstream order;
    /// callers adapt them into their own descriptor shape.
    ///
    /// # Default Implementation
    ///
    /// The default implementation returns an error indicating that
    /// model listing is not supported by this provider.
    async fn list_models(&self) -> Result<Vec<serde_json::Value>> {
        Err(crate::error::PrompthashError::Provider(
            "Model listing is not supported by this provider".to_string(),
        )
        .into())
    }
}
