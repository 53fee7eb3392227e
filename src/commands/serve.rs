//! `serve` command: wire services from configuration and run the HTTP API

use crate::cli::ServiceSelection;
use crate::config::Config;
use crate::error::Result;
use crate::providers::{self, Provider};
use crate::server::{self, Services};
use crate::services::{ChatService, ModelListService, PromptImproverService};
use crate::store::ConversationStore;

use std::sync::Arc;

/// Build the selected services
///
/// The provider is shared by all services in the process.
///
/// # Errors
///
/// Returns `PrompthashError::MissingCredentials` if chat or the improver
/// is selected without an API key
pub fn build_services(
    config: &Config,
    selection: ServiceSelection,
    provider: Option<Arc<dyn Provider>>,
) -> Result<Services> {
    let mut services = Services::default();

    if selection.includes_chat() {
        let store = Arc::new(ConversationStore::new());
        services.chat = Some(Arc::new(ChatService::new(
            provider.clone(),
            store,
            config.chat.clone(),
        )?));
    }

    if selection.includes_improver() {
        services.improver = Some(Arc::new(PromptImproverService::new(
            provider.clone(),
            config.improver.clone(),
        )?));
    }

    if selection.includes_models() {
        services.models = Some(Arc::new(ModelListService::new(provider)));
    }

    Ok(services)
}

/// Run the HTTP API until shutdown
///
/// # Errors
///
/// Returns error if a selected service cannot start or the server fails
pub async fn run_serve(config: Config, selection: ServiceSelection) -> Result<()> {
    tracing::info!("Starting services: {:?}", selection);

    let provider = providers::create_provider(&config.provider)?;
    let services = build_services(&config, selection, provider)?;
    let app = server::build_router(services, &config.frontend);

    server::serve(app, &config.server.bind).await
}
