use super::types::*;
use crate::{Error, Result};
use async_openai::{Client, config::OpenAIConfig, types::CreateChatCompletionResponse};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

const DEFAULT_TEMPERATURE: f32 = 0.7;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    /// An empty `base_url` keeps the library's default endpoint.
    pub fn new(api_key: &str, base_url: &str) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

        if !base_url.is_empty() {
            openai_config = openai_config.with_api_base(base_url);
        }

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

/// Body of a `/chat/completions` call. Roles are not interpreted here; the
/// provider decides which ones it accepts.
#[derive(Debug, Serialize)]
pub struct RequestBody<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
}

pub fn request_body(request: &ChatCompletionRequest) -> RequestBody<'_> {
    RequestBody {
        model: &request.model,
        messages: &request.messages,
        temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Creating chat completion with {} messages",
            request.messages.len()
        );

        let response: CreateChatCompletionResponse = self
            .client
            .chat()
            .create_byot(request_body(&request))
            .await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choices = response
            .choices
            .into_iter()
            .map(|choice| -> Result<Choice> {
                let content = choice.message.content.ok_or_else(|| {
                    Error::provider(format!("Choice {} has no text content", choice.index))
                })?;

                Ok(Choice {
                    index: choice.index,
                    message: ChatMessage::new(choice.message.role.to_string(), content),
                    finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
        })
    }
}
