use crate::relay::Message;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
