//! Browser chat page
//!
//! The page is embedded in the binary and rendered once at startup with
//! the base URLs of the three services.

use crate::config::FrontendConfig;

use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

const CHAT_PAGE_TEMPLATE: &str = include_str!("chat_page.html");

/// Substitutes the service base URLs into the page template
///
/// Values are written as JavaScript string literals.
pub fn render_chat_page(frontend: &FrontendConfig) -> String {
    CHAT_PAGE_TEMPLATE
        .replace("{{ agent_api }}", &js_string(&frontend.agent_api))
        .replace("{{ improver_api }}", &js_string(&frontend.improver_api))
        .replace("{{ models_api }}", &js_string(&frontend.models_api))
}

fn js_string(value: &str) -> String {
    // Escape '<' so a value can never close the surrounding script tag.
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
}

pub(crate) async fn index(State(page): State<Arc<String>>) -> Html<String> {
    Html(page.as_str().to_owned())
}
