use super::error::RecommendationServiceError;
use crate::domain::shared::{parse_model_json, BilingualDraft, BilingualText, CandidateResponse};
use crate::infrastructure::repositories::{CompletionRepository, CompletionRequest};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Candidates returned by a successful recommendation
pub const CANDIDATE_COUNT: usize = 3;

/// The first generation plus one retry
const MAX_ATTEMPTS: usize = 2;

const MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.7;

pub struct RecommendationService {
    completion_repo: Arc<dyn CompletionRepository>,
}

impl RecommendationService {
    pub fn new(completion_repo: Arc<dyn CompletionRepository>) -> Self {
        Self { completion_repo }
    }
}

#[async_trait]
pub trait RecommendationServiceApi: Send + Sync {
    /// Suggest replies the learner could send next
    ///
    /// Returns exactly three candidates, or none at all when the model could
    /// not produce three distinct valid ones within two attempts.
    async fn recommend(
        &self,
        context: String,
        source_utterance_id: Option<String>,
    ) -> Result<Vec<CandidateResponse>, RecommendationServiceError>;
}

#[async_trait]
impl RecommendationServiceApi for RecommendationService {
    async fn recommend(
        &self,
        context: String,
        source_utterance_id: Option<String>,
    ) -> Result<Vec<CandidateResponse>, RecommendationServiceError> {
        let context = context.trim();
        if context.is_empty() {
            return Err(RecommendationServiceError::Invalid(
                "Response is required".to_string(),
            ));
        }

        let mut collected: Vec<BilingualText> = Vec::new();

        for attempt in 1..=MAX_ATTEMPTS {
            let raw = self
                .completion_repo
                .complete(CompletionRequest {
                    system_prompt: None,
                    user_prompt: build_prompt(context),
                    max_tokens: Some(MAX_TOKENS),
                    temperature: TEMPERATURE,
                    json_mode: false,
                })
                .await
                .map_err(|e| RecommendationServiceError::Upstream(e.to_string()))?;

            merge_candidates(&raw, &mut collected);

            if collected.len() >= CANDIDATE_COUNT {
                break;
            }

            tracing::warn!(
                attempt,
                valid = collected.len(),
                "Not enough valid recommendations"
            );
        }

        if collected.len() < CANDIDATE_COUNT {
            return Ok(Vec::new());
        }

        let candidates: Vec<CandidateResponse> = collected
            .into_iter()
            .take(CANDIDATE_COUNT)
            .map(|text| CandidateResponse::new(text, source_utterance_id.clone()))
            .collect();

        tracing::info!(
            count = candidates.len(),
            source_utterance_id = ?source_utterance_id,
            "Recommendations generated"
        );

        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationBatch {
    #[serde(default)]
    recommendations: Vec<serde_json::Value>,
}

/// Add the valid, not yet seen candidates in `raw` to `collected`.
/// Output that is not a recommendation batch contributes nothing.
fn merge_candidates(raw: &str, collected: &mut Vec<BilingualText>) {
    let batch: RecommendationBatch = match parse_model_json(raw) {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unparseable recommendations");
            return;
        }
    };

    for item in batch.recommendations {
        let Ok(draft) = serde_json::from_value::<BilingualDraft>(item) else {
            continue;
        };
        let Ok(text) = draft.validate() else {
            continue;
        };
        if collected.iter().any(|seen| seen.thai == text.thai) {
            continue;
        }
        collected.push(text);
    }
}

fn build_prompt(context: &str) -> String {
    format!(
        r#"Given this message which includes both the conversation and context: "{}"

What are three natural ways to respond to this message? Each version should:
- Include both Thai and English versions
- Be from the perspective of the user responding to this message
- Be natural and contextually appropriate
- Include common Thai phrases where natural, and focus on conversational and casual language, not academic
- Be limited to one sentence per language

Return only raw JSON in this exact format without any markdown or code block syntax:
{{
  "recommendations": [
    {{ "Thai": "Thai message here", "English": "English message here" }},
    {{ "Thai": "Second Thai message here", "English": "Second English message here" }},
    {{ "Thai": "Third Thai message here", "English": "Third English message here" }}
  ]
}}"#,
        context
    )
}
