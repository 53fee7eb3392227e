//! Model listing command for Prompthash
//!
//! Runs the model listing service once from the command line and prints
//! the categorized catalogue as a table or as the raw API JSON.

use crate::config::Config;
use crate::error::{PrompthashError, Result};
use crate::providers;
use crate::services::{ModelListService, ModelsResponse};
use prettytable::{cell, row, Table};

/// List upstream models grouped by category
///
/// # Arguments
///
/// * `config` - Configuration containing provider settings
/// * `json` - Print the `/api/models` response body instead of a table
///
/// # Errors
///
/// Returns error if the provider cannot be created or the listing reports
/// an error
///
/// # Examples
///
/// ```no_run
/// use prompthash::config::Config;
/// use prompthash::commands::models::list_models;
///
/// # async fn example(config: Config) -> anyhow::Result<()> {
/// list_models(&config, false).await?;
/// # Ok(())
/// # }
/// ```
pub async fn list_models(config: &Config, json: bool) -> Result<()> {
    tracing::debug!("models::list_models json={}", json);

    let provider = providers::create_provider(&config.provider)?;
    let service = ModelListService::new(provider);
    let response = service.list_models().await;

    if json {
        let body = serialize_pretty(&response).map_err(PrompthashError::Serialization)?;
        println!("{}", body);
    }

    if let Some(error) = &response.error {
        return Err(PrompthashError::Provider(error.clone()).into());
    }

    if !json {
        println!("\nAvailable models from {}:\n", config.provider.base_url);
        build_models_table(&response).printstd();
        println!();
    }

    Ok(())
}

fn serialize_pretty<T: serde::Serialize + ?Sized>(
    value: &T,
) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// One row per listed model, in upstream order
fn build_models_table(response: &ModelsResponse) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Model Name", "Display Name", "Category", "Description"]);

    for name in &response.models {
        let details = response.model_details.get(name);
        let display_name = details
            .and_then(|d| d.display_name.as_deref())
            .unwrap_or("-");
        let category = details
            .map(|d| d.category().to_string())
            .unwrap_or_else(|| "text".to_string());
        let description = details
            .and_then(|d| d.description.as_deref())
            .unwrap_or("-");

        table.add_row(row![name, display_name, category, description]);
    }

    table
}
