use super::error::ProviderError;
use crate::domain::dialogue::{AssistantPersona, ThreadMessage, ThreadRole};
use async_trait::async_trait;

/// Repository for the assistant provider's persistent conversation threads.
/// Abstracts the underlying provider (OpenAI Assistants today).
///
/// Threads live at the provider; this service only keeps their ids.
#[async_trait]
pub trait AssistantRepository: Send + Sync {
    /// Reuse `existing_id` if the provider still knows it, otherwise create a
    /// new assistant configured with `persona`. Returns the assistant id in use.
    async fn create_or_get_assistant(
        &self,
        existing_id: Option<&str>,
        persona: &AssistantPersona,
    ) -> Result<String, ProviderError>;

    async fn create_thread(&self) -> Result<String, ProviderError>;

    async fn thread_exists(&self, thread_id: &str) -> Result<bool, ProviderError>;

    async fn post_message(
        &self,
        thread_id: &str,
        role: ThreadRole,
        content: &str,
    ) -> Result<ThreadMessage, ProviderError>;

    /// Run the assistant on the thread and wait until the run completes.
    ///
    /// # Errors
    /// Returns error if the run ends in any state other than completed, or
    /// does not finish in time.
    async fn run(&self, thread_id: &str, assistant_id: &str) -> Result<(), ProviderError>;

    /// The most recent message of the thread, if any
    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>, ProviderError>;

    /// Every message of the thread, most recent first
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, ProviderError>;
}
