//! OpenAI chat-completion backend for the gateway.

use super::{ChatService, Message, Role};
use crate::error::{Result, SkisseError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Text-generation service backed by the OpenAI chat completions API.
pub struct OpenAiChatService {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAiChatService {
    pub fn new(model: &str, timeout: Duration) -> Self {
        Self {
            client: create_client(timeout),
            model: model.to_string(),
        }
    }

    /// Convert gateway messages into the request types async-openai expects.
    fn build_messages(messages: &[Message]) -> Result<Vec<ChatCompletionRequestMessage>> {
        messages
            .iter()
            .map(|m| match m.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(m.content.clone())
                    .build()
                    .map(Into::into)
                    .map_err(|e| SkisseError::OpenAI(e.to_string())),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(m.content.clone())
                    .build()
                    .map(Into::into)
                    .map_err(|e| SkisseError::OpenAI(e.to_string())),
            })
            .collect()
    }
}

#[async_trait]
impl ChatService for OpenAiChatService {
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(Self::build_messages(messages)?)
            .build()
            .map_err(|e| SkisseError::OpenAI(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SkisseError::OpenAI(format!("Chat completion failed: {}", e)))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| SkisseError::OpenAI("Empty response from model".to_string()))?
            .clone();

        debug!("Received {} characters from {}", text.len(), self.model);
        Ok(text)
    }
}
