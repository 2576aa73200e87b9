use crate::domain::shared::ModelOutputError;
use serde::{Deserialize, Serialize};

pub const PHRASE_COUNT: usize = 5;
pub const CHARACTER_COUNT: usize = 3;

/// A generated role-play scenario, stored as JSON exactly as returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario: ScenarioSetting,
    pub phrases: Vec<ScenarioPhrase>,
    pub characters: Vec<ScenarioCharacter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSetting {
    pub narrative: String,
    pub location: String,
    pub time_period: String,
    pub cultural_context: String,
    pub difficulty_level: String,
    pub background_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPhrase {
    pub thai: String,
    pub english: String,
    pub romanization: String,
    pub formality: String,
    pub usage_context: String,
    pub cultural_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCharacter {
    pub name: String,
    pub age: CharacterAge,
    pub occupation: String,
    pub personality: String,
    pub speaking_style: String,
    pub background_story: String,
    #[serde(rename = "type")]
    pub character_type: String,
    pub avatar_description: String,
}

/// Models return the age both as a number and as a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterAge {
    Years(u32),
    Text(String),
}

impl Scenario {
    /// Check the counts and the fields a learner cannot do without
    pub fn validate(&self) -> Result<(), ModelOutputError> {
        if self.phrases.len() != PHRASE_COUNT {
            return Err(ModelOutputError::Structure(format!(
                "expected {} phrases, got {}",
                PHRASE_COUNT,
                self.phrases.len()
            )));
        }
        if self.characters.len() != CHARACTER_COUNT {
            return Err(ModelOutputError::Structure(format!(
                "expected {} characters, got {}",
                CHARACTER_COUNT,
                self.characters.len()
            )));
        }
        if self
            .phrases
            .iter()
            .any(|p| p.thai.trim().is_empty() || p.english.trim().is_empty())
        {
            return Err(ModelOutputError::Structure(
                "phrase without Thai or English text".to_string(),
            ));
        }
        if self.characters.iter().any(|c| c.name.trim().is_empty()) {
            return Err(ModelOutputError::Structure(
                "character without a name".to_string(),
            ));
        }
        Ok(())
    }
}
