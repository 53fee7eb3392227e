//! Test utilities for Prompthash
//!
//! Provides a scriptable in-process [`MockProvider`] that records every
//! completion request.

use crate::error::{PrompthashError, Result};
use crate::providers::{GenerationParams, Message, Provider};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How the mock answers completion requests
#[derive(Debug, Clone)]
enum Reply {
    Fixed(String),
    Echo,
    Fail,
    Panic,
}

/// One recorded `complete` call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub messages: Vec<Message>,
    pub params: GenerationParams,
}

/// Provider double with canned replies and call recording
pub struct MockProvider {
    reply: Reply,
    models: Option<Vec<Value>>,
    calls: Mutex<Vec<RecordedCall>>,
    list_calls: AtomicUsize,
}

impl MockProvider {
    fn new(reply: Reply, models: Option<Vec<Value>>) -> Self {
        Self {
            reply,
            models,
            calls: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Always completes with `text`; model listing fails
    pub fn replying(text: &str) -> Self {
        Self::new(Reply::Fixed(text.to_string()), None)
    }

    /// Completes with `echo: <last message content>`
    pub fn echo() -> Self {
        Self::new(Reply::Echo, None)
    }

    /// Fails every call
    pub fn failing() -> Self {
        Self::new(Reply::Fail, None)
    }

    /// Panics inside `complete`
    pub fn panicking() -> Self {
        Self::new(Reply::Panic, None)
    }

    /// Lists `models`; completions fail
    pub fn with_models(models: Vec<Value>) -> Self {
        Self::new(Reply::Fail, Some(models))
    }

    /// Number of `complete` calls seen
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Most recent `complete` call
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Number of `list_models` calls seen
    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            messages: messages.to_vec(),
            params: *params,
        });

        match &self.reply {
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Echo => Ok(format!(
                "echo: {}",
                messages.last().map(|m| m.content.as_str()).unwrap_or_default()
            )),
            Reply::Fail => Err(PrompthashError::Provider("mock failure".to_string()).into()),
            Reply::Panic => panic!("mock provider panicked"),
        }
    }

    async fn list_models(&self) -> Result<Vec<Value>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.models
            .clone()
            .ok_or_else(|| PrompthashError::Provider("mock listing failure".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_records_calls() {
        let mock = MockProvider::echo();
        let params = GenerationParams {
            temperature: 0.1,
            top_p: 0.5,
            max_tokens: 8,
        };
        let text = mock
            .complete("m", &[Message::user("ping")], &params)
            .await
            .unwrap();

        assert_eq!(text, "echo: ping");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.last_call().unwrap().params, params);
    }

    #[tokio::test]
    async fn test_mock_provider_listing() {
        assert!(MockProvider::failing().list_models().await.is_err());
        let mock = MockProvider::with_models(vec![serde_json::json!({"id": "a"})]);
        assert_eq!(mock.list_models().await.unwrap().len(), 1);
        assert_eq!(mock.list_call_count(), 1);
    }
}
