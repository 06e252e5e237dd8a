use super::types::{ChatResponse, ErrorResponse, HealthResponse, StatusResponse, TestResponse};
use crate::relay::{ChatRequest, Relay};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info};

pub const ROOT_MESSAGE: &str = "康康1号机服务已启动";
pub const TEST_MESSAGE: &str = "测试成功！康康1号机正在运行( •̀ ω •́ )✧";

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: ROOT_MESSAGE,
        status: "online",
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

pub async fn test_greeting() -> Json<TestResponse> {
    Json(TestResponse {
        message: TEST_MESSAGE,
    })
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Received chat request with {} messages",
        request.messages.len()
    );

    match state.relay.complete(request).await {
        Ok(message) => Ok(Json(ChatResponse { message })),
        Err(e) => {
            error!("Chat request failed: {}", e);
            Err((
                e.status_code(),
                Json(ErrorResponse {
                    detail: e.detail(),
                }),
            ))
        }
    }
}
