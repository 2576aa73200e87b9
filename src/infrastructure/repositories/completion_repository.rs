use super::error::ProviderError;
use async_trait::async_trait;

/// A single-shot text generation request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: Option<String>,
    pub user_prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: f32,
    /// Ask the provider to constrain output to a JSON object
    pub json_mode: bool,
}

/// Repository for stateless LLM completions (recommendations, edits, scenarios).
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Returns the raw text of the first choice
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}
