use super::completion_repository::{CompletionRepository, CompletionRequest};
use super::error::ProviderError;
use super::openai_call::{bounded, build_error, PROVIDER};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// OpenAI chat completions implementation of the completion repository
pub struct OpenAiCompletionRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    request_timeout: Duration,
}

impl OpenAiCompletionRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, request_timeout: Duration) -> Self {
        Self {
            client,
            model,
            request_timeout,
        }
    }

    fn build_messages(
        request: &CompletionRequest,
    ) -> Result<Vec<ChatCompletionRequestMessage>, ProviderError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(system_prompt) = &request.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt.as_str())
                    .build()
                    .map_err(build_error)?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user_prompt.as_str())
                .build()
                .map_err(build_error)?
                .into(),
        );

        Ok(messages)
    }
}

#[async_trait]
impl CompletionRepository for OpenAiCompletionRepository {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let start_time = Instant::now();
        let messages = Self::build_messages(&request)?;

        let chat_request = CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(request.temperature),
            max_tokens: request.max_tokens,
            response_format: request.json_mode.then_some(ResponseFormat::JsonObject),
            ..Default::default()
        };

        tracing::info!(
            model = %self.model,
            prompt_length = request.user_prompt.len(),
            json_mode = request.json_mode,
            "Calling OpenAI chat completion"
        );

        let response = bounded(
            "chat_completion",
            self.request_timeout,
            self.client.chat().create(chat_request),
        )
        .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProviderError::request(PROVIDER, "completion returned no content"))?;

        tracing::info!(
            provider = PROVIDER,
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = content.len(),
            "Chat completion finished"
        );

        Ok(content)
    }
}
