//! Prompthash - chat, prompt improvement, and model listing services
//!
//! This library provides the REST services that sit in front of an
//! OpenAI-compatible inference API (ASI Cloud by default).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `services`: Chat, prompt improver, and model listing logic
//! - `store`: In-memory conversation logs and request counters
//! - `providers`: Upstream completion client abstraction and ASI implementation
//! - `prompts`: System instructions and prompt builders
//! - `server`: Axum router, handlers, and the browser chat page
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and handlers
//!
//! # Example
//!
//! ```no_run
//! use prompthash::config::Config;
//! use prompthash::providers::create_provider;
//! use prompthash::services::{ChatRequest, ChatService};
//! use prompthash::store::ConversationStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::default();
//!     config.provider.api_key = Some("sk-...".to_string());
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let chat = ChatService::new(provider, Arc::new(ConversationStore::new()), config.chat)?;
//!     let response = chat
//!         .chat(ChatRequest {
//!             message: Some("Hello!".to_string()),
//!             ..Default::default()
//!         })
//!         .await;
//!     println!("{}", response.reply);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod server;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{PrompthashError, Result};
pub use services::{ChatService, ModelListService, PromptImproverService};
pub use store::{ConversationStore, RequestCounter};

#[cfg(test)]
pub mod test_utils;
