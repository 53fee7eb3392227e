use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use prompthash::config::{Config, ProviderConfig};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Provider settings pointing at a mock upstream (e.g. `MockServer::uri()`)
#[allow(dead_code)]
pub fn provider_config(upstream: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: Some("sk-test".to_string()),
        base_url: format!("{}/v1", upstream),
        timeout_seconds: 5,
    }
}

#[allow(dead_code)]
pub fn config_for(upstream: &str) -> Config {
    Config {
        provider: provider_config(upstream),
        ..Default::default()
    }
}

/// OpenAI-style completion body with a single choice
#[allow(dead_code)]
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
