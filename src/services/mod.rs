//! Request-handling services
//!
//! Each service owns its slice of in-memory state and a handle to the
//! upstream provider. Upstream calls run on spawned tasks so a slow
//! completion never blocks other requests; failures are logged and turned
//! into fixed soft error strings by the callers.

pub mod chat;
pub mod improver;
pub mod models;

pub use chat::{ChatHealth, ChatRequest, ChatResponse, ChatService};
pub use improver::{ImproveRequest, ImproveResponse, PromptImproverService};
pub use models::{ModelCategory, ModelDescriptor, ModelListService, ModelsResponse};

use crate::error::{PrompthashError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Status string reported by every health endpoint
pub const HEALTH_OK: &str = "ok";

/// Health payload for services that count requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHealth {
    /// Always `"ok"`
    pub status: String,
    /// Fixed service identity
    pub agent_name: String,
    /// Successful requests since startup
    pub total_requests: u64,
}

impl RequestHealth {
    pub(crate) fn ok(agent_name: &str, total_requests: u64) -> Self {
        Self {
            status: HEALTH_OK.to_string(),
            agent_name: agent_name.to_string(),
            total_requests,
        }
    }
}

/// Runs an upstream call on its own task and waits for it
///
/// A panicked or cancelled task is reported as a provider error so callers
/// handle it like any other upstream failure.
pub(crate) async fn offload<T, F>(call: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(call)
        .await
        .map_err(|e| PrompthashError::Provider(format!("Upstream task failed: {}", e)))?
}
