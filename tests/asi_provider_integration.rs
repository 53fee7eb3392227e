mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prompthash::providers::{AsiProvider, GenerationParams, Message, Provider};

use common::{completion_body, provider_config};

fn params() -> GenerationParams {
    GenerationParams {
        temperature: 0.7,
        top_p: 0.95,
        max_tokens: 512,
    }
}

#[tokio::test]
async fn test_complete_posts_openai_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-oss-20b",
            "messages": [
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "hello"}
            ],
            "max_tokens": 512,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  Hi there!\n")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AsiProvider::new(&provider_config(&server.uri())).unwrap();
    let text = provider
        .complete(
            "openai/gpt-oss-20b",
            &[Message::system("sys"), Message::user("hello")],
            &params(),
        )
        .await
        .unwrap();

    assert_eq!(text, "Hi there!");
}

#[tokio::test]
async fn test_complete_error_status_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AsiProvider::new(&provider_config(&server.uri())).unwrap();
    let err = provider
        .complete("m", &[Message::user("hello")], &params())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_complete_without_choices_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let provider = AsiProvider::new(&provider_config(&server.uri())).unwrap();
    let result = provider
        .complete("m", &[Message::user("hello")], &params())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_list_models_returns_raw_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"id": "openai/gpt-oss-20b", "object": "model"},
                {"id": "google/veo-3", "display_name": "Veo 3"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AsiProvider::new(&provider_config(&server.uri())).unwrap();
    let models = provider.list_models().await.unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[1]["display_name"], "Veo 3");
}

#[tokio::test]
async fn test_list_models_unauthorized_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let provider = AsiProvider::new(&provider_config(&server.uri())).unwrap();
    let err = provider.list_models().await.unwrap_err();

    assert!(err.to_string().contains("401"));
}
