//! Axum handlers for the REST endpoints
//!
//! Handlers are thin: they extract the body, call the service, and wrap
//! the result in `Json`. POST endpoints always answer 200.

use crate::services::{
    ChatHealth, ChatRequest, ChatResponse, ChatService, ImproveRequest, ImproveResponse,
    ModelListService, ModelsResponse, PromptImproverService, RequestHealth,
};

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `{ok, agent}` wrapper used by the UI-facing health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEnvelope<T> {
    pub ok: bool,
    pub agent: T,
}

pub(crate) async fn chat(
    State(service): State<Arc<ChatService>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(service.chat(request).await)
}

pub(crate) async fn chat_health(State(service): State<Arc<ChatService>>) -> Json<ChatHealth> {
    Json(service.health())
}

pub(crate) async fn chat_health_envelope(
    State(service): State<Arc<ChatService>>,
) -> Json<HealthEnvelope<ChatHealth>> {
    Json(HealthEnvelope {
        ok: true,
        agent: service.health(),
    })
}

pub(crate) async fn improve(
    State(service): State<Arc<PromptImproverService>>,
    Json(request): Json<ImproveRequest>,
) -> Json<ImproveResponse> {
    Json(service.improve(request).await)
}

pub(crate) async fn improver_health(
    State(service): State<Arc<PromptImproverService>>,
) -> Json<RequestHealth> {
    Json(service.health())
}

pub(crate) async fn list_models(
    State(service): State<Arc<ModelListService>>,
) -> Json<ModelsResponse> {
    Json(service.list_models().await)
}

pub(crate) async fn models_health(
    State(service): State<Arc<ModelListService>>,
) -> Json<RequestHealth> {
    Json(service.health())
}
