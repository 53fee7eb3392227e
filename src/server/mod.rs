//! HTTP server for Prompthash
//!
//! Builds the axum router for whichever services run in this process and
//! serves it until Ctrl+C or SIGTERM.
//!
//! # Routes
//!
//! | Method | Path | Service |
//! |---|---|---|
//! | POST | `/api/chat` | chat |
//! | GET | `/api/chat/health`, `/api/health/raw` | chat |
//! | GET | `/api/health` | chat (`{ok, agent}` wrapper) |
//! | POST | `/api/improve` | improver |
//! | GET | `/api/improver/health`, `/api/improver/health/raw` | improver |
//! | GET | `/api/models` | models |
//! | GET | `/api/models/health` | models |
//! | GET | `/` | chat page |

pub mod handlers;
pub mod pages;

use crate::config::FrontendConfig;
use crate::error::{PrompthashError, Result};
use crate::services::{ChatService, ModelListService, PromptImproverService};

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Services mounted by one server process
///
/// A `None` service contributes no routes.
#[derive(Default)]
pub struct Services {
    pub chat: Option<Arc<ChatService>>,
    pub improver: Option<Arc<PromptImproverService>>,
    pub models: Option<Arc<ModelListService>>,
}

/// Builds the application router
///
/// # Examples
///
/// ```
/// use prompthash::config::FrontendConfig;
/// use prompthash::server::{build_router, Services};
/// use prompthash::services::ModelListService;
/// use std::sync::Arc;
///
/// let services = Services {
///     models: Some(Arc::new(ModelListService::new(None))),
///     ..Default::default()
/// };
/// let _router = build_router(services, &FrontendConfig::default());
/// ```
pub fn build_router(services: Services, frontend: &FrontendConfig) -> Router {
    let page = Arc::new(pages::render_chat_page(frontend));
    let mut app = Router::new()
        .route("/", get(pages::index))
        .with_state(page);

    if let Some(chat) = services.chat {
        app = app.merge(
            Router::new()
                .route("/api/chat", post(handlers::chat))
                .route("/api/chat/health", get(handlers::chat_health))
                .route("/api/health/raw", get(handlers::chat_health))
                .route("/api/health", get(handlers::chat_health_envelope))
                .with_state(chat),
        );
    }

    if let Some(improver) = services.improver {
        app = app.merge(
            Router::new()
                .route("/api/improve", post(handlers::improve))
                .route("/api/improver/health", get(handlers::improver_health))
                .route("/api/improver/health/raw", get(handlers::improver_health))
                .with_state(improver),
        );
    }

    if let Some(models) = services.models {
        app = app.merge(
            Router::new()
                .route("/api/models", get(handlers::list_models))
                .route("/api/models/health", get(handlers::models_health))
                .with_state(models),
        );
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds `bind` and serves `app` until a shutdown signal arrives
///
/// # Errors
///
/// Returns `PrompthashError::Server` if the address cannot be bound or the
/// server fails
pub async fn serve(app: Router, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| PrompthashError::Server(format!("Failed to bind to {}: {}", bind, e)))?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Prompthash listening on http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PrompthashError::Server(format!("Server error: {}", e)))?;

    tracing::info!("Prompthash server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
