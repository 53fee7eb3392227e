//! Model listing service
//!
//! Fetches the upstream model catalogue on every request, adapts each
//! loosely-typed entry into a [`ModelDescriptor`], and groups the names by
//! modality using keyword matching.

use crate::providers::Provider;
use crate::services::{offload, RequestHealth};
use crate::store::RequestCounter;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Identity reported by the model listing health endpoint
pub const MODELS_AGENT_NAME: &str = "prompthash_model_agent";

const MISSING_KEY_ERROR: &str = "ASICLOUD_API_KEY is not set; cannot list ASI models.";
const LIST_ERROR: &str = "Error retrieving models from ASI";

const AUDIO_KEYWORDS: &[&str] = &["audio", "tts", "native-audio", "live"];
const IMAGE_KEYWORDS: &[&str] = &["image", "vision", "img", "photo"];
const VIDEO_KEYWORDS: &[&str] = &["video", "vid", "veo"];

/// Modality bucket for a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Text,
    Audio,
    Image,
    Video,
}

impl ModelCategory {
    /// All categories, in the order they are reported
    pub const ALL: [ModelCategory; 4] = [Self::Text, Self::Audio, Self::Image, Self::Video];

    /// Classifies a model from its name and optional display name
    ///
    /// Keywords are matched as lowercase substrings of either string.
    /// Video wins over image, image over audio; anything unmatched is text.
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::services::ModelCategory;
    ///
    /// assert_eq!(ModelCategory::classify("video-audio-gen", None), ModelCategory::Video);
    /// assert_eq!(ModelCategory::classify("m1", Some("Vision Pro")), ModelCategory::Image);
    /// assert_eq!(ModelCategory::classify("openai/gpt-oss-20b", None), ModelCategory::Text);
    /// ```
    pub fn classify(name: &str, display_name: Option<&str>) -> Self {
        let name = name.to_lowercase();
        let display = display_name.unwrap_or_default().to_lowercase();
        let matches = |keywords: &[&str]| {
            keywords
                .iter()
                .any(|keyword| name.contains(keyword) || display.contains(keyword))
        };

        if matches(VIDEO_KEYWORDS) {
            Self::Video
        } else if matches(IMAGE_KEYWORDS) {
            Self::Image
        } else if matches(AUDIO_KEYWORDS) {
            Self::Audio
        } else {
            Self::Text
        }
    }

    /// Key used in the `categories` map
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details for one upstream model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

impl ModelDescriptor {
    /// Adapts one upstream catalogue entry
    ///
    /// The name comes from `id`, falling back to `name`; only non-empty
    /// strings count. Entries with neither are skipped by returning `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::services::ModelDescriptor;
    /// use serde_json::json;
    ///
    /// let model = ModelDescriptor::from_upstream(&json!({"id": "m1", "displayName": "Model One"}))
    ///     .unwrap();
    /// assert_eq!(model.name, "m1");
    /// assert_eq!(model.display_name.as_deref(), Some("Model One"));
    ///
    /// assert!(ModelDescriptor::from_upstream(&json!({"object": "model"})).is_none());
    /// ```
    pub fn from_upstream(item: &Value) -> Option<Self> {
        let name = non_empty_str(item, "id").or_else(|| non_empty_str(item, "name"))?;
        let display_name =
            non_empty_str(item, "display_name").or_else(|| non_empty_str(item, "displayName"));
        let description = item
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(Self {
            name,
            display_name,
            description,
        })
    }

    /// Category derived from the name and display name
    pub fn category(&self) -> ModelCategory {
        ModelCategory::classify(&self.name, self.display_name.as_deref())
    }
}

fn non_empty_str(item: &Value, field: &str) -> Option<String> {
    item.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Result of `GET /api/models`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Model names in upstream order
    pub models: Vec<String>,
    pub model_details: BTreeMap<String, ModelDescriptor>,
    /// Names grouped by category; empty when `error` is set
    pub categories: BTreeMap<String, Vec<String>>,
    pub error: Option<String>,
}

impl ModelsResponse {
    fn failure(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn from_descriptors(descriptors: Vec<ModelDescriptor>) -> Self {
        let mut categories: BTreeMap<String, Vec<String>> = ModelCategory::ALL
            .iter()
            .map(|category| (category.as_str().to_string(), Vec::new()))
            .collect();
        let mut models = Vec::with_capacity(descriptors.len());
        let mut model_details = BTreeMap::new();

        for descriptor in descriptors {
            models.push(descriptor.name.clone());
            model_details.insert(descriptor.name.clone(), descriptor);
        }

        // Every occurrence of a name is classified by its last descriptor.
        for name in &models {
            if let Some(descriptor) = model_details.get(name) {
                categories
                    .entry(descriptor.category().as_str().to_string())
                    .or_default()
                    .push(name.clone());
            }
        }

        Self {
            models,
            model_details,
            categories,
            error: None,
        }
    }
}

/// Model listing service
///
/// Unlike chat and the improver, this service starts without an upstream
/// provider and reports the missing key on each request instead.
pub struct ModelListService {
    provider: Option<Arc<dyn Provider>>,
    counter: RequestCounter,
}

impl ModelListService {
    /// Creates the model listing service
    pub fn new(provider: Option<Arc<dyn Provider>>) -> Self {
        if provider.is_none() {
            tracing::warn!("Model listing started without ASICLOUD_API_KEY");
        }
        Self {
            provider,
            counter: RequestCounter::new(),
        }
    }

    /// Lists and categorizes the upstream models
    ///
    /// An upstream error and an empty catalogue produce the same response.
    pub async fn list_models(&self) -> ModelsResponse {
        let Some(provider) = self.provider.as_ref().map(Arc::clone) else {
            return ModelsResponse::failure(MISSING_KEY_ERROR);
        };

        let items = match offload(async move { provider.list_models().await }).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Failed to list ASI models: {:#}", e);
                return ModelsResponse::failure(LIST_ERROR);
            }
        };

        let descriptors: Vec<ModelDescriptor> = items
            .iter()
            .filter_map(ModelDescriptor::from_upstream)
            .collect();

        if descriptors.is_empty() {
            tracing::warn!(
                "ASI returned no usable models ({} raw entries)",
                items.len()
            );
            return ModelsResponse::failure(LIST_ERROR);
        }

        let response = ModelsResponse::from_descriptors(descriptors);
        let total = self.counter.increment();
        tracing::info!(
            "Listed {} models, total_requests={}",
            response.models.len(),
            total
        );
        response
    }

    /// Reports service identity and the success counter
    pub fn health(&self) -> RequestHealth {
        RequestHealth::ok(MODELS_AGENT_NAME, self.counter.get())
    }
}
