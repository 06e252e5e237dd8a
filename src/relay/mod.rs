mod persona;
mod types;

pub use persona::PERSONA_PROMPT;
pub use types::*;

use crate::{
    Error, Result,
    config::{API_KEY_ENV, LlmConfig},
    llm::{ChatCompletionRequest, ChatMessage, LlmClient, OpenAiClient},
};
use tracing::{debug, info, warn};

/// Forwards chat turns to the provider behind a fixed persona.
///
/// Built once at startup and shared read-only between requests. Without a
/// credential the relay still exists, but every completion fails with a
/// configuration error.
pub struct Relay {
    llm_client: Option<Box<dyn LlmClient>>,
    model: String,
    persona: String,
}

impl Relay {
    pub fn new(llm_client: Option<Box<dyn LlmClient>>, model: impl Into<String>) -> Self {
        Self {
            llm_client,
            model: model.into(),
            persona: PERSONA_PROMPT.to_string(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        let llm_client: Option<Box<dyn LlmClient>> = match config.api_key() {
            Some(api_key) => {
                info!("Initializing OpenAI client for model {}", config.model);
                Some(Box::new(OpenAiClient::new(api_key, &config.base_url)))
            }
            None => {
                warn!("{} is not set; /api/chat will be unavailable", API_KEY_ENV);
                None
            }
        };

        Self::new(llm_client, config.model.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.llm_client.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The persona system message followed by the caller's turns in order.
    pub fn outbound_messages(&self, messages: &[Message]) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage::system(self.persona.clone()))
            .chain(messages.iter().map(ChatMessage::from))
            .collect()
    }

    /// Sends one conversation to the provider and returns its reply as an
    /// assistant message.
    pub async fn complete(&self, request: ChatRequest) -> Result<Message> {
        let llm_client = self.llm_client.as_ref().ok_or_else(|| {
            Error::config(format!(
                "OpenAI API key is not configured (set {})",
                API_KEY_ENV
            ))
        })?;

        let messages = self.outbound_messages(&request.messages);
        info!(
            "Sending {} messages to provider (temperature {})",
            messages.len(),
            request.temperature
        );
        debug!("Outbound messages: {:?}", messages);

        let response = llm_client
            .create_chat_completion(ChatCompletionRequest {
                model: self.model.clone(),
                messages,
                temperature: Some(request.temperature),
            })
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider("Provider returned no choices"))?;

        info!("Provider reply: {}", choice.message.content);

        Ok(Message::assistant(choice.message.content))
    }
}
