use super::error::EditorServiceError;
use crate::domain::shared::{BilingualText, CandidateResponse};
use crate::infrastructure::repositories::{CompletionRepository, CompletionRequest};
use async_trait::async_trait;
use std::sync::Arc;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that provides responses in JSON format, including both Thai and English.";
const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

pub struct EditorService {
    completion_repo: Arc<dyn CompletionRepository>,
}

impl EditorService {
    pub fn new(completion_repo: Arc<dyn CompletionRepository>) -> Self {
        Self { completion_repo }
    }
}

#[async_trait]
pub trait EditorServiceApi: Send + Sync {
    /// Rewrite `candidate` according to `instruction`
    ///
    /// The result is a new candidate with its own id that keeps the
    /// original's link to the utterance it answers.
    async fn edit(
        &self,
        candidate: &CandidateResponse,
        instruction: &str,
    ) -> Result<CandidateResponse, EditorServiceError>;
}

#[async_trait]
impl EditorServiceApi for EditorService {
    async fn edit(
        &self,
        candidate: &CandidateResponse,
        instruction: &str,
    ) -> Result<CandidateResponse, EditorServiceError> {
        let instruction = instruction.trim();
        if instruction.is_empty() || candidate.native_text.trim().is_empty() {
            return Err(EditorServiceError::Invalid(
                "Input and selected response are required".to_string(),
            ));
        }

        let raw = self
            .completion_repo
            .complete(CompletionRequest {
                system_prompt: Some(SYSTEM_PROMPT.to_string()),
                user_prompt: build_prompt(candidate, instruction),
                max_tokens: Some(MAX_TOKENS),
                temperature: TEMPERATURE,
                json_mode: false,
            })
            .await
            .map_err(|e| EditorServiceError::Upstream(e.to_string()))?;

        let text = BilingualText::from_model_output(&raw).map_err(|e| {
            tracing::warn!(error = %e, "Edited response is not a bilingual payload");
            EditorServiceError::Upstream(e.to_string())
        })?;

        let edited = CandidateResponse::new(text, candidate.source_utterance_id.clone());

        tracing::info!(
            original_id = %candidate.id,
            edited_id = %edited.id,
            "Candidate edited"
        );

        Ok(edited)
    }
}

fn build_prompt(candidate: &CandidateResponse, instruction: &str) -> String {
    let original = if candidate.translated_text.trim().is_empty() {
        candidate.native_text.clone()
    } else {
        format!("{} ({})", candidate.native_text, candidate.translated_text)
    };

    format!(
        r#"Create a new Thai/English response by transforming: "{}" according to this request: "{}"

The new response should:
- Be casual and friendly in tone
- Be appropriate for a conversation in Thailand
- Include common Thai phrases where natural
- Be limited to one sentence per language
- Be completely different from the original meaning if the request suggests so

Return only raw JSON in this exact format without any markdown or code block syntax:
{{
  "Thai": "",
  "English": ""
}}"#,
        original, instruction
    )
}
