//! Chat service
//!
//! Answers free-form messages with the configured assistant model, keeping
//! a short per-sender conversation log that is replayed as context.

use crate::config::ChatConfig;
use crate::error::{PrompthashError, Result};
use crate::prompts::CHAT_SYSTEM_PROMPT;
use crate::providers::{Message, Provider};
use crate::services::{offload, HEALTH_OK};
use crate::store::{ConversationStore, Turn};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identity reported by the chat health endpoint
pub const CHAT_AGENT_NAME: &str = "prompthash_chat_agent";

/// Sender used when a request does not name one
pub const DEFAULT_SENDER: &str = "rest_client";

/// Number of prior turns replayed to the model
pub const CONTEXT_TURNS: usize = 5;

const EMPTY_MESSAGE_ERROR: &str = "Please provide a message.";
const GENERATION_ERROR: &str = "I hit an error while generating a response.";
const EMPTY_RESPONSE_PLACEHOLDER: &str = "No response provided.";

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation key; defaults to `rest_client`
    #[serde(default)]
    pub sender: Option<String>,
    /// Message text
    #[serde(default)]
    pub message: Option<String>,
    /// Model override for this request
    #[serde(default)]
    pub model: Option<String>,
}

/// Result of a chat request
///
/// Always returned with HTTP 200; `error` is set when the request was
/// rejected or the upstream call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub sender: String,
    pub total_messages: u64,
    pub history: Vec<Turn>,
    pub model: String,
    pub error: Option<String>,
}

/// Health payload for the chat service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHealth {
    pub status: String,
    pub agent_name: String,
    pub total_messages: u64,
}

/// Chat service backed by the shared conversation store
pub struct ChatService {
    provider: Arc<dyn Provider>,
    store: Arc<ConversationStore>,
    config: ChatConfig,
}

impl ChatService {
    /// Creates the chat service
    ///
    /// # Errors
    ///
    /// Returns `PrompthashError::MissingCredentials` when no upstream
    /// provider is available
    pub fn new(
        provider: Option<Arc<dyn Provider>>,
        store: Arc<ConversationStore>,
        config: ChatConfig,
    ) -> Result<Self> {
        let provider = provider.ok_or_else(|| {
            PrompthashError::MissingCredentials(
                "ASICLOUD_API_KEY is required by the chat service".to_string(),
            )
        })?;

        tracing::info!("Chat service ready: default model={}", config.model);

        Ok(Self {
            provider,
            store,
            config,
        })
    }

    /// Handles one chat message
    pub async fn chat(&self, request: ChatRequest) -> ChatResponse {
        let sender = request
            .sender
            .filter(|sender| !sender.is_empty())
            .unwrap_or_else(|| DEFAULT_SENDER.to_string());
        let user_text = request.message.as_deref().unwrap_or_default().trim().to_string();
        let model = self.resolve_model(request.model.as_deref());

        let (history, total_messages) = self.store.snapshot(&sender);

        if user_text.is_empty() {
            return ChatResponse {
                reply: String::new(),
                sender,
                total_messages,
                history,
                model,
                error: Some(EMPTY_MESSAGE_ERROR.to_string()),
            };
        }

        let messages = build_messages(&history, &user_text);
        let provider = Arc::clone(&self.provider);
        let params = self.config.generation();
        let call_model = model.clone();

        tracing::debug!(
            "Chat request: sender={}, model={}, {} context turns",
            sender,
            model,
            messages.len() - 2
        );

        let completion = offload(async move {
            provider.complete(&call_model, &messages, &params).await
        })
        .await;

        match completion {
            Ok(raw) => {
                let reply = format_assistant_output(&raw);
                let (history, total_messages) =
                    self.store.record_exchange(&sender, &user_text, &reply);
                tracing::info!(
                    "Chat reply sent: sender={}, total_messages={}",
                    sender,
                    total_messages
                );
                ChatResponse {
                    reply,
                    sender,
                    total_messages,
                    history,
                    model,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!("Chat completion failed for sender {}: {:#}", sender, e);
                ChatResponse {
                    reply: String::new(),
                    sender,
                    total_messages,
                    history,
                    model,
                    error: Some(GENERATION_ERROR.to_string()),
                }
            }
        }
    }

    /// Reports service identity and the message counter
    pub fn health(&self) -> ChatHealth {
        ChatHealth {
            status: HEALTH_OK.to_string(),
            agent_name: CHAT_AGENT_NAME.to_string(),
            total_messages: self.store.total_messages(),
        }
    }

    /// Picks the request's model when given, else the configured default
    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(model) if !model.is_empty() => model.to_string(),
            _ => self.config.model.clone(),
        }
    }
}

/// Builds the completion prompt: system instruction, recent turns, new message
fn build_messages(history: &[Turn], user_text: &str) -> Vec<Message> {
    let recent = &history[history.len().saturating_sub(CONTEXT_TURNS)..];

    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(Message::system(CHAT_SYSTEM_PROMPT));
    messages.extend(recent.iter().map(|turn| Message {
        role: turn.role.as_str().to_string(),
        content: turn.text.clone(),
    }));
    messages.push(Message::user(user_text));
    messages
}

/// Splits a `<think>...</think>` block out of a raw completion
///
/// Text without both markers is returned unchanged. A closing marker that
/// comes before the opening one leaves the think process empty.
///
/// # Examples
///
/// ```
/// use prompthash::services::chat::format_assistant_output;
///
/// assert_eq!(
///     format_assistant_output("<think>reasoning here</think>final answer"),
///     "Think Process:\nreasoning here\n\nResponse:\nfinal answer"
/// );
/// assert_eq!(format_assistant_output("plain"), "plain");
/// ```
pub fn format_assistant_output(raw: &str) -> String {
    let (Some(open), Some(close)) = (raw.find(THINK_OPEN), raw.find(THINK_CLOSE)) else {
        return raw.to_string();
    };

    let think = raw
        .get(open + THINK_OPEN.len()..close)
        .unwrap_or_default()
        .trim();
    let response = raw[close + THINK_CLOSE.len()..].trim();
    let response = if response.is_empty() {
        EMPTY_RESPONSE_PLACEHOLDER
    } else {
        response
    };

    format!("Think Process:\n{}\n\nResponse:\n{}", think, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Role;
    use crate::test_utils::MockProvider;

    fn service_with(mock: Arc<MockProvider>) -> (ChatService, Arc<ConversationStore>) {
        let store = Arc::new(ConversationStore::new());
        let provider: Arc<dyn Provider> = mock;
        let service =
            ChatService::new(Some(provider), Arc::clone(&store), ChatConfig::default()).unwrap();
        (service, store)
    }

    fn request(sender: Option<&str>, message: &str) -> ChatRequest {
        ChatRequest {
            sender: sender.map(str::to_string),
            message: Some(message.to_string()),
            model: None,
        }
    }

    #[test]
    fn test_new_requires_provider() {
        let result = ChatService::new(
            None,
            Arc::new(ConversationStore::new()),
            ChatConfig::default(),
        );
        let err = result.err().unwrap();
        assert!(matches!(
            err.downcast_ref::<PrompthashError>(),
            Some(PrompthashError::MissingCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_chat_success_records_exchange() {
        let mock = Arc::new(MockProvider::replying("Hello there"));
        let (service, store) = service_with(Arc::clone(&mock));

        let response = service.chat(request(Some("alice"), "  hi  ")).await;

        assert_eq!(response.reply, "Hello there");
        assert_eq!(response.sender, "alice");
        assert_eq!(response.total_messages, 1);
        assert_eq!(response.model, "openai/gpt-oss-20b");
        assert!(response.error.is_none());
        assert_eq!(
            response.history,
            vec![Turn::user("hi"), Turn::assistant("Hello there")]
        );
        assert_eq!(store.history("alice"), response.history);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_sends_generation_params_and_prompt() {
        let mock = Arc::new(MockProvider::replying("ok"));
        let (service, _store) = service_with(Arc::clone(&mock));

        service.chat(request(None, "question")).await;

        let call = mock.last_call().unwrap();
        assert_eq!(call.model, "openai/gpt-oss-20b");
        assert_eq!(call.params.max_tokens, 512);
        assert_eq!(call.params.temperature, 0.7);
        assert_eq!(call.params.top_p, 0.95);
        assert_eq!(call.messages.len(), 2);
        assert_eq!(call.messages[0], Message::system(CHAT_SYSTEM_PROMPT));
        assert_eq!(call.messages[1], Message::user("question"));
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_rejected_without_upstream_call() {
        let mock = Arc::new(MockProvider::replying("unused"));
        let (service, store) = service_with(Arc::clone(&mock));
        store.record_exchange(DEFAULT_SENDER, "earlier", "reply");

        let response = service.chat(request(None, "   \n")).await;

        assert_eq!(response.reply, "");
        assert_eq!(response.error.as_deref(), Some("Please provide a message."));
        assert_eq!(response.sender, "rest_client");
        assert_eq!(response.total_messages, 1);
        assert_eq!(response.history.len(), 2);
        assert_eq!(mock.call_count(), 0);
        assert_eq!(store.total_messages(), 1);
    }

    #[tokio::test]
    async fn test_chat_missing_message_field_is_rejected() {
        let mock = Arc::new(MockProvider::replying("unused"));
        let (service, _store) = service_with(Arc::clone(&mock));

        let response = service.chat(ChatRequest::default()).await;

        assert_eq!(response.error.as_deref(), Some("Please provide a message."));
        assert_eq!(response.total_messages, 0);
        assert!(response.history.is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_leaves_state_unchanged() {
        let mock = Arc::new(MockProvider::failing());
        let (service, store) = service_with(Arc::clone(&mock));

        let response = service.chat(request(Some("bob"), "hello")).await;

        assert_eq!(response.reply, "");
        assert_eq!(
            response.error.as_deref(),
            Some("I hit an error while generating a response.")
        );
        assert_eq!(response.total_messages, 0);
        assert!(response.history.is_empty());
        assert!(store.history("bob").is_empty());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_upstream_panic_is_soft_error() {
        let mock = Arc::new(MockProvider::panicking());
        let (service, store) = service_with(mock);

        let response = service.chat(request(None, "hello")).await;

        assert_eq!(
            response.error.as_deref(),
            Some("I hit an error while generating a response.")
        );
        assert_eq!(store.total_messages(), 0);
    }

    #[tokio::test]
    async fn test_chat_empty_sender_uses_default() {
        let mock = Arc::new(MockProvider::replying("ok"));
        let (service, store) = service_with(mock);

        let response = service.chat(request(Some(""), "hi")).await;

        assert_eq!(response.sender, DEFAULT_SENDER);
        assert_eq!(store.history(DEFAULT_SENDER).len(), 2);
    }

    #[tokio::test]
    async fn test_chat_model_override_is_trimmed() {
        let mock = Arc::new(MockProvider::replying("ok"));
        let (service, _store) = service_with(Arc::clone(&mock));

        let response = service
            .chat(ChatRequest {
                sender: None,
                message: Some("hi".to_string()),
                model: Some("  meta/llama-3  ".to_string()),
            })
            .await;

        assert_eq!(response.model, "meta/llama-3");
        assert_eq!(mock.last_call().unwrap().model, "meta/llama-3");
    }

    #[tokio::test]
    async fn test_chat_replays_only_last_five_turns() {
        let mock = Arc::new(MockProvider::echo());
        let (service, _store) = service_with(Arc::clone(&mock));

        for i in 0..4 {
            service.chat(request(Some("carol"), &format!("m{}", i))).await;
        }
        service.chat(request(Some("carol"), "latest")).await;

        let call = mock.last_call().unwrap();
        // system + 5 replayed turns + new user message
        assert_eq!(call.messages.len(), 7);
        assert_eq!(call.messages[1].role, "assistant");
        assert_eq!(call.messages[1].content, "echo: m1");
        assert_eq!(call.messages[5], Message::assistant("echo: m3"));
        assert_eq!(call.messages[6], Message::user("latest"));
    }

    #[tokio::test]
    async fn test_chat_history_is_bounded() {
        let mock = Arc::new(MockProvider::echo());
        let (service, _store) = service_with(mock);

        let mut last = None;
        for i in 0..7 {
            last = Some(service.chat(request(None, &format!("m{}", i))).await);
        }
        let response = last.unwrap();

        assert_eq!(response.total_messages, 7);
        assert_eq!(response.history.len(), 10);
        assert_eq!(response.history[0], Turn::user("m2"));
        assert_eq!(response.history[9], Turn::assistant("echo: m6"));
    }

    #[tokio::test]
    async fn test_chat_stores_formatted_reply() {
        let mock = Arc::new(MockProvider::replying("<think>plan</think>done"));
        let (service, store) = service_with(mock);

        let response = service.chat(request(None, "go")).await;

        let expected = "Think Process:\nplan\n\nResponse:\ndone";
        assert_eq!(response.reply, expected);
        assert_eq!(store.history(DEFAULT_SENDER)[1], Turn::assistant(expected));
    }

    #[tokio::test]
    async fn test_concurrent_senders_do_not_mix_histories() {
        let mock = Arc::new(MockProvider::echo());
        let (service, store) = service_with(mock);
        let service = Arc::new(service);

        let tasks: Vec<_> = ["alice", "bob", "carol", "dave"]
            .into_iter()
            .map(|sender| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    for i in 0..3 {
                        service
                            .chat(request(Some(sender), &format!("{}-{}", sender, i)))
                            .await;
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.total_messages(), 12);
        for sender in ["alice", "bob", "carol", "dave"] {
            let history = store.history(sender);
            assert_eq!(history.len(), 6);
            assert!(history.iter().all(|turn| turn.text.contains(sender)));
        }
    }

    #[tokio::test]
    async fn test_health_reads_counter_without_mutating() {
        let mock = Arc::new(MockProvider::replying("ok"));
        let (service, _store) = service_with(mock);
        service.chat(request(None, "hi")).await;

        let first = service.health();
        let second = service.health();

        assert_eq!(first.status, "ok");
        assert_eq!(first.agent_name, "prompthash_chat_agent");
        assert_eq!(first.total_messages, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_messages_maps_roles() {
        let history = vec![Turn::user("q"), Turn::assistant("a")];
        let messages = build_messages(&history, "next");
        assert_eq!(messages[1].role, Role::User.as_str());
        assert_eq!(messages[2], Message::assistant("a"));
        assert_eq!(messages[3], Message::user("next"));
    }

    #[test]
    fn test_format_think_block() {
        assert_eq!(
            format_assistant_output("<think>reasoning here</think>final answer"),
            "Think Process:\nreasoning here\n\nResponse:\nfinal answer"
        );
    }

    #[test]
    fn test_format_think_block_trims_segments() {
        assert_eq!(
            format_assistant_output("intro <think>\n  a\n</think>\n\n  b  "),
            "Think Process:\na\n\nResponse:\nb"
        );
    }

    #[test]
    fn test_format_think_block_empty_response_placeholder() {
        assert_eq!(
            format_assistant_output("<think>only thoughts</think>   "),
            "Think Process:\nonly thoughts\n\nResponse:\nNo response provided."
        );
    }

    #[test]
    fn test_format_without_markers_passes_through() {
        assert_eq!(format_assistant_output("just text"), "just text");
        assert_eq!(format_assistant_output("<think>unclosed"), "<think>unclosed");
        assert_eq!(format_assistant_output("closed</think> only"), "closed</think> only");
    }

    #[test]
    fn test_format_closing_before_opening_yields_empty_think() {
        assert_eq!(
            format_assistant_output("a</think>b<think>c"),
            "Think Process:\n\n\nResponse:\nb<think>c"
        );
        assert_eq!(
            format_assistant_output("</think><think>"),
            "Think Process:\n\n\nResponse:\n<think>"
        );
    }

    #[test]
    fn test_chat_response_serializes_null_error() {
        let response = ChatResponse {
            reply: "r".to_string(),
            sender: "s".to_string(),
            total_messages: 1,
            history: vec![Turn::user("q")],
            model: "m".to_string(),
            error: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value["error"].is_null());
        assert_eq!(value["history"][0]["role"], "user");
        assert_eq!(value["history"][0]["text"], "q");
    }

    #[test]
    fn test_chat_request_tolerates_missing_fields() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert!(request.sender.is_none());
        assert!(request.message.is_none());
        assert!(request.model.is_none());
    }
}
