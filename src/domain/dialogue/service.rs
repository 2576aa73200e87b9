use super::error::DialogueServiceError;
use super::persona::{fallback_reply, greeting, AssistantPersona};
use super::{ThreadMessage, ThreadRole, TurnResult};
use crate::domain::shared::{BilingualText, Utterance};
use crate::domain::user::User;
use crate::infrastructure::repositories::{AssistantRepository, ProviderError, UserRepository};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct DialogueService {
    user_repo: Arc<dyn UserRepository>,
    assistant_repo: Arc<dyn AssistantRepository>,
    persona: AssistantPersona,
}

impl DialogueService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        assistant_repo: Arc<dyn AssistantRepository>,
        persona: AssistantPersona,
    ) -> Self {
        Self {
            user_repo,
            assistant_repo,
            persona,
        }
    }
}

#[async_trait]
pub trait DialogueServiceApi: Send + Sync {
    /// Advance a conversation by one turn
    ///
    /// This operation:
    /// - Makes sure the user has a live assistant, creating and saving one if not
    /// - Starts a new thread when `thread_id` is absent
    /// - Posts the greeting when there is no input, otherwise posts the input,
    ///   runs the assistant and returns its reply
    ///
    /// A reply that is not a valid bilingual payload is replaced by a fixed
    /// apology rather than failing the turn.
    async fn advance(
        &self,
        user_id: Uuid,
        thread_id: Option<String>,
        input: Option<String>,
    ) -> Result<TurnResult, DialogueServiceError>;

    /// Every utterance of a thread, oldest first
    async fn history(&self, thread_id: &str) -> Result<Vec<Utterance>, DialogueServiceError>;
}

#[async_trait]
impl DialogueServiceApi for DialogueService {
    async fn advance(
        &self,
        user_id: Uuid,
        thread_id: Option<String>,
        input: Option<String>,
    ) -> Result<TurnResult, DialogueServiceError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DialogueServiceError::NotFound("User not found".to_string()))?;

        let assistant_id = self.ensure_assistant(&user).await?;
        let thread_id = self.open_thread(thread_id).await?;

        let input = input
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let utterance = match input {
            None => self.post_greeting(&thread_id).await?,
            Some(input) => self.take_turn(&thread_id, &assistant_id, &input).await?,
        };

        tracing::info!(
            user_id = %user.id,
            thread_id = %thread_id,
            utterance_id = %utterance.id,
            "Dialogue turn completed"
        );

        Ok(TurnResult {
            utterance,
            thread_id,
            assistant_id,
        })
    }

    async fn history(&self, thread_id: &str) -> Result<Vec<Utterance>, DialogueServiceError> {
        if !self
            .assistant_repo
            .thread_exists(thread_id)
            .await
            .map_err(upstream)?
        {
            return Err(DialogueServiceError::NotFound(format!(
                "Thread not found: {}",
                thread_id
            )));
        }

        let mut messages = self
            .assistant_repo
            .list_messages(thread_id)
            .await
            .map_err(upstream)?;
        messages.reverse();

        Ok(messages.into_iter().map(to_utterance).collect())
    }
}

impl DialogueService {
    /// Reuse the user's assistant or create one, persisting a changed id
    async fn ensure_assistant(&self, user: &User) -> Result<String, DialogueServiceError> {
        let assistant_id = self
            .assistant_repo
            .create_or_get_assistant(user.assistant_id.as_deref(), &self.persona)
            .await
            .map_err(upstream)?;

        if user.assistant_id.as_deref() != Some(assistant_id.as_str()) {
            self.user_repo
                .set_assistant_id(user.id, &assistant_id)
                .await?;
            tracing::info!(
                user_id = %user.id,
                assistant_id = %assistant_id,
                "Assistant assigned to user"
            );
        }

        Ok(assistant_id)
    }

    async fn open_thread(&self, thread_id: Option<String>) -> Result<String, DialogueServiceError> {
        match thread_id.filter(|id| !id.trim().is_empty()) {
            Some(thread_id) => {
                let exists = self
                    .assistant_repo
                    .thread_exists(&thread_id)
                    .await
                    .map_err(upstream)?;
                if !exists {
                    return Err(DialogueServiceError::NotFound(format!(
                        "Thread not found: {}",
                        thread_id
                    )));
                }
                Ok(thread_id)
            }
            None => self.assistant_repo.create_thread().await.map_err(upstream),
        }
    }

    async fn post_greeting(&self, thread_id: &str) -> Result<Utterance, DialogueServiceError> {
        let text = greeting();
        let message = self
            .assistant_repo
            .post_message(thread_id, ThreadRole::Assistant, &text.to_json())
            .await
            .map_err(upstream)?;

        Ok(Utterance::agent(message.id, text))
    }

    async fn take_turn(
        &self,
        thread_id: &str,
        assistant_id: &str,
        input: &str,
    ) -> Result<Utterance, DialogueServiceError> {
        let posted = self
            .assistant_repo
            .post_message(thread_id, ThreadRole::User, input)
            .await
            .map_err(upstream)?;

        self.assistant_repo
            .run(thread_id, assistant_id)
            .await
            .map_err(upstream)?;

        let latest = self
            .assistant_repo
            .latest_message(thread_id)
            .await
            .map_err(upstream)?;

        // Only a message newer than the learner's line answers this turn
        let Some(reply) = latest.filter(|message| {
            message.role == ThreadRole::Assistant && message.id != posted.id
        }) else {
            tracing::warn!(thread_id, "Run completed without an assistant message");
            return Ok(Utterance::agent(Uuid::new_v4().to_string(), fallback_reply()));
        };

        let text = BilingualText::from_model_output(&reply.content).unwrap_or_else(|e| {
            tracing::warn!(
                thread_id,
                message_id = %reply.id,
                error = %e,
                "Assistant reply is not a bilingual payload, using fallback"
            );
            fallback_reply()
        });

        Ok(Utterance::agent(reply.id, text))
    }
}

fn upstream(err: ProviderError) -> DialogueServiceError {
    DialogueServiceError::Upstream(err.to_string())
}

/// Assistant lines are bilingual payloads; anything else is shown verbatim
fn to_utterance(message: ThreadMessage) -> Utterance {
    match message.role {
        ThreadRole::User => Utterance::user(message.id, message.content),
        ThreadRole::Assistant => match BilingualText::from_model_output(&message.content) {
            Ok(text) => Utterance::agent(message.id, text),
            Err(_) => Utterance::agent(message.id, BilingualText::new(message.content, "")),
        },
    }
}
