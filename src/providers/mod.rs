//! Provider module for Prompthash
//!
//! This module contains the completion client abstraction and the
//! ASI Cloud implementation.

pub mod asi;
pub mod base;

pub use asi::AsiProvider;
pub use base::{GenerationParams, Message, Provider};

use crate::config::ProviderConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the shared upstream provider from configuration
///
/// Returns `Ok(None)` when no API key is configured. Chat and prompt
/// improvement refuse to start in that case; model listing keeps running
/// and reports the missing key on each request.
///
/// # Errors
///
/// Returns error if the HTTP client cannot be initialized
///
/// # Examples
///
/// ```
/// use prompthash::config::ProviderConfig;
/// use prompthash::providers::create_provider;
///
/// let provider = create_provider(&ProviderConfig::default()).unwrap();
/// assert!(provider.is_none());
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Option<Arc<dyn Provider>>> {
    if config.api_key().is_none() {
        tracing::warn!("ASICLOUD_API_KEY is not set; upstream provider unavailable");
        return Ok(None);
    }

    let provider: Arc<dyn Provider> = Arc::new(AsiProvider::new(config)?);
    Ok(Some(provider))
}
