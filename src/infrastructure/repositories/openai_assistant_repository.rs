use super::assistant_repository::AssistantRepository;
use super::error::ProviderError;
use super::openai_call::{bounded, build_error, PROVIDER};
use crate::domain::dialogue::{AssistantPersona, ThreadMessage, ThreadRole};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        CreateAssistantRequestArgs, CreateMessageRequestArgs, CreateRunRequestArgs,
        CreateThreadRequestArgs, MessageContent, MessageObject, MessageRole, RunStatus,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Page size when reading a thread back; the provider's maximum
const PAGE_SIZE: &str = "100";

/// OpenAI Assistants implementation of the assistant repository
pub struct OpenAiAssistantRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    request_timeout: Duration,
    run_timeout: Duration,
    poll_interval: Duration,
}

impl OpenAiAssistantRepository {
    pub fn new(
        client: Arc<Client<OpenAIConfig>>,
        model: String,
        request_timeout: Duration,
        run_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            model,
            request_timeout,
            run_timeout,
            poll_interval,
        }
    }

    fn to_thread_message(message: MessageObject) -> ThreadMessage {
        let role = if matches!(message.role, MessageRole::User) {
            ThreadRole::User
        } else {
            ThreadRole::Assistant
        };

        let content = message
            .content
            .iter()
            .filter_map(|part| match part {
                MessageContent::Text(text) => Some(text.text.value.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        ThreadMessage {
            id: message.id,
            role,
            content,
        }
    }
}

#[async_trait]
impl AssistantRepository for OpenAiAssistantRepository {
    async fn create_or_get_assistant(
        &self,
        existing_id: Option<&str>,
        persona: &AssistantPersona,
    ) -> Result<String, ProviderError> {
        if let Some(assistant_id) = existing_id {
            match bounded(
                "retrieve_assistant",
                self.request_timeout,
                self.client.assistants().retrieve(assistant_id),
            )
            .await
            {
                Ok(assistant) => return Ok(assistant.id),
                Err(e) => {
                    tracing::warn!(
                        assistant_id,
                        error = %e,
                        "Failed to retrieve assistant, creating a new one"
                    );
                }
            }
        }

        let request = CreateAssistantRequestArgs::default()
            .name(persona.name.as_str())
            .instructions(persona.instructions.as_str())
            .model(self.model.as_str())
            .build()
            .map_err(build_error)?;

        let assistant = bounded(
            "create_assistant",
            self.request_timeout,
            self.client.assistants().create(request),
        )
        .await?;

        tracing::info!(
            assistant_id = %assistant.id,
            persona = %persona.name,
            model = %self.model,
            "Assistant created"
        );

        Ok(assistant.id)
    }

    async fn create_thread(&self) -> Result<String, ProviderError> {
        let request = CreateThreadRequestArgs::default()
            .build()
            .map_err(build_error)?;

        let thread = bounded(
            "create_thread",
            self.request_timeout,
            self.client.threads().create(request),
        )
        .await?;

        Ok(thread.id)
    }

    async fn thread_exists(&self, thread_id: &str) -> Result<bool, ProviderError> {
        let threads = self.client.threads();
        match tokio::time::timeout(self.request_timeout, threads.retrieve(thread_id)).await {
            Ok(Ok(_)) => Ok(true),
            // The API rejects unknown thread ids with an error body
            Ok(Err(OpenAIError::ApiError(api_error))) => {
                tracing::info!(
                    thread_id,
                    error = %api_error.message,
                    "Thread could not be retrieved"
                );
                Ok(false)
            }
            Ok(Err(e)) => Err(ProviderError::request(PROVIDER, e)),
            Err(_) => Err(ProviderError::Timeout {
                provider: PROVIDER,
                seconds: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn post_message(
        &self,
        thread_id: &str,
        role: ThreadRole,
        content: &str,
    ) -> Result<ThreadMessage, ProviderError> {
        let role = match role {
            ThreadRole::User => MessageRole::User,
            ThreadRole::Assistant => MessageRole::Assistant,
        };

        let request = CreateMessageRequestArgs::default()
            .role(role)
            .content(content.to_string())
            .build()
            .map_err(build_error)?;

        let message = bounded(
            "create_message",
            self.request_timeout,
            self.client.threads().messages(thread_id).create(request),
        )
        .await?;

        Ok(Self::to_thread_message(message))
    }

    async fn run(&self, thread_id: &str, assistant_id: &str) -> Result<(), ProviderError> {
        let start_time = Instant::now();

        let request = CreateRunRequestArgs::default()
            .assistant_id(assistant_id)
            .build()
            .map_err(build_error)?;

        let mut run = bounded(
            "create_run",
            self.request_timeout,
            self.client.threads().runs(thread_id).create(request),
        )
        .await?;

        loop {
            match run.status {
                RunStatus::Completed => break,
                RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling => {}
                status => {
                    tracing::error!(
                        thread_id,
                        run_id = %run.id,
                        status = ?status,
                        "Assistant run did not complete"
                    );
                    return Err(ProviderError::request(
                        PROVIDER,
                        format!("assistant run {} ended with status {:?}", run.id, status),
                    ));
                }
            }

            if start_time.elapsed() >= self.run_timeout {
                tracing::error!(
                    thread_id,
                    run_id = %run.id,
                    timeout_secs = self.run_timeout.as_secs(),
                    "Assistant run timed out"
                );
                return Err(ProviderError::Timeout {
                    provider: PROVIDER,
                    seconds: self.run_timeout.as_secs(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;

            let run_id = run.id.clone();
            run = bounded(
                "retrieve_run",
                self.request_timeout,
                self.client.threads().runs(thread_id).retrieve(&run_id),
            )
            .await?;
        }

        tracing::info!(
            provider = PROVIDER,
            thread_id,
            assistant_id,
            latency_ms = start_time.elapsed().as_millis(),
            "Assistant run completed"
        );

        Ok(())
    }

    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>, ProviderError> {
        let response = bounded(
            "latest_message",
            self.request_timeout,
            self.client
                .threads()
                .messages(thread_id)
                .list(&[("limit", "1"), ("order", "desc")]),
        )
        .await?;

        Ok(response
            .data
            .into_iter()
            .next()
            .map(Self::to_thread_message))
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, ProviderError> {
        let mut messages = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut query = vec![("limit", PAGE_SIZE), ("order", "desc")];
            if let Some(cursor) = after.as_deref() {
                query.push(("after", cursor));
            }

            let page = bounded(
                "list_messages",
                self.request_timeout,
                self.client.threads().messages(thread_id).list(&query),
            )
            .await?;

            messages.extend(page.data.into_iter().map(Self::to_thread_message));

            match page.last_id {
                Some(last_id) if page.has_more => after = Some(last_id),
                _ => break,
            }
        }

        Ok(messages)
    }
}
