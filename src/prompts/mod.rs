//! System prompts and instruction builders
//!
//! The chat assistant and the prompt improver each send a fixed system
//! instruction; the improver also wraps the client's prompt in a
//! target-specific user message.

pub mod chat_prompt;
pub mod improver_prompt;

pub use chat_prompt::CHAT_SYSTEM_PROMPT;
pub use improver_prompt::{build_improvement_prompt, Target, IMPROVER_SYSTEM_PROMPT};
