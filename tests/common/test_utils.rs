use super::mocks::MockLlmClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use persona_relay::{
    config::{Config, LlmConfig, LogsConfig, ServerConfig},
    relay::Relay,
    server::{self, handlers::AppState},
};
use serde_json::Value;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            base_url: String::new(),
            api_key: Some("test-api-key".to_string()),
            model: "gpt-4o-mini".to_string(),
        },
    }
}

/// Router whose relay talks to the given mock provider
pub fn create_test_app(mock: &MockLlmClient) -> Router {
    let relay = Relay::new(Some(Box::new(mock.clone())), "gpt-4o-mini");
    server::router(AppState::new(relay))
}

/// Router whose relay has no provider credential
pub fn create_unconfigured_app() -> Router {
    server::router(AppState::new(Relay::new(None, "gpt-4o-mini")))
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
