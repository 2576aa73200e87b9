use super::error::ScenarioServiceError;
use super::model::Scenario;
use crate::domain::shared::parse_model_json;
use crate::infrastructure::repositories::{
    CompletionRepository, CompletionRequest, ScenarioRepository, UserRepository,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = r#"You are a Thai language learning scenario generator specializing in culturally accurate and contextually relevant scenarios.

Your response must follow this exact JSON structure:
{
  "scenario": {
    "narrative": "Brief narrative describing the scenario context",
    "location": "Specific location in Thailand",
    "time_period": "Time of day or year",
    "cultural_context": "Relevant cultural/societal context",
    "difficulty_level": "beginner/intermediate/advanced",
    "background_description": "Detailed scene description"
  },
  "phrases": [
    {
      "thai": "Thai text",
      "english": "English translation",
      "romanization": "Pronunciation guide",
      "formality": "casual/polite/formal",
      "usage_context": "When/how to use this phrase",
      "cultural_notes": "Cultural insights"
    }
  ],
  "characters": [
    {
      "name": "Thai name",
      "age": "numeric age",
      "occupation": "job or role",
      "personality": "key traits",
      "speaking_style": "speech characteristics",
      "background_story": "brief relevant background",
      "type": "elder_male/young_male/young_female/etc",
      "avatar_description": "visual description for avatar"
    }
  ]
}

Requirements:
- Generate natural, conversational Thai that natives actually use
- Include exactly 5 phrases
- Include exactly 3 characters
- Focus on cultural accuracy
- Include colloquial language and slang where appropriate
- All fields must be present and properly formatted"#;

pub struct ScenarioService {
    user_repo: Arc<dyn UserRepository>,
    scenario_repo: Arc<dyn ScenarioRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
}

impl ScenarioService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        scenario_repo: Arc<dyn ScenarioRepository>,
        completion_repo: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            user_repo,
            scenario_repo,
            completion_repo,
        }
    }
}

#[async_trait]
pub trait ScenarioServiceApi: Send + Sync {
    /// Generate a role-play scenario from a free-text prompt and save it for the user
    async fn generate(
        &self,
        user_id: Uuid,
        prompt: String,
    ) -> Result<(Scenario, Uuid), ScenarioServiceError>;
}

#[async_trait]
impl ScenarioServiceApi for ScenarioService {
    async fn generate(
        &self,
        user_id: Uuid,
        prompt: String,
    ) -> Result<(Scenario, Uuid), ScenarioServiceError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ScenarioServiceError::Invalid(
                "Prompt is required".to_string(),
            ));
        }

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ScenarioServiceError::NotFound("User not found".to_string()))?;

        let raw = self
            .completion_repo
            .complete(CompletionRequest {
                system_prompt: Some(SYSTEM_PROMPT.to_string()),
                user_prompt: prompt.to_string(),
                max_tokens: None,
                temperature: TEMPERATURE,
                json_mode: true,
            })
            .await
            .map_err(|e| ScenarioServiceError::Upstream(e.to_string()))?;

        let scenario = parse_scenario(&raw).map_err(|e| {
            tracing::warn!(error = %e, response_length = raw.len(), "Rejected generated scenario");
            e
        })?;

        let scenario_id = self.scenario_repo.create(user_id, &scenario).await?;

        tracing::info!(
            user_id = %user_id,
            scenario_id = %scenario_id,
            location = %scenario.scenario.location,
            "Scenario generated"
        );

        Ok((scenario, scenario_id))
    }
}

fn parse_scenario(raw: &str) -> Result<Scenario, ScenarioServiceError> {
    let scenario: Scenario =
        parse_model_json(raw).map_err(|e| ScenarioServiceError::Upstream(e.to_string()))?;
    scenario
        .validate()
        .map_err(|e| ScenarioServiceError::Upstream(e.to_string()))?;
    Ok(scenario)
}
