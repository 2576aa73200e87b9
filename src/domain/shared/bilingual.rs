use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A line of dialogue in Thai together with its English translation.
///
/// This is the two-field payload every model prompt asks for:
/// `{"Thai": "...", "English": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    #[serde(rename = "Thai")]
    pub thai: String,
    #[serde(rename = "English")]
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelOutputError {
    #[error("model output is not valid JSON: {0}")]
    Malformed(String),
    #[error("model output is missing the {0} field")]
    MissingField(&'static str),
    #[error("model output does not match the expected structure: {0}")]
    Structure(String),
}

/// A bilingual pair as the model produced it, before validation.
/// Either side may be absent or blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BilingualDraft {
    #[serde(rename = "Thai", alias = "thai", default)]
    pub thai: Option<String>,
    #[serde(rename = "English", alias = "english", default)]
    pub english: Option<String>,
}

impl BilingualDraft {
    pub fn validate(self) -> Result<BilingualText, ModelOutputError> {
        let thai = non_blank(self.thai).ok_or(ModelOutputError::MissingField("Thai"))?;
        let english = non_blank(self.english).ok_or(ModelOutputError::MissingField("English"))?;
        Ok(BilingualText { thai, english })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl BilingualText {
    pub fn new(thai: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            thai: thai.into(),
            english: english.into(),
        }
    }

    /// Parse raw model output as a strict bilingual payload
    pub fn from_model_output(raw: &str) -> Result<Self, ModelOutputError> {
        let draft: BilingualDraft = parse_model_json(raw)?;
        draft.validate()
    }

    /// Serialized form posted into assistant threads
    pub fn to_json(&self) -> String {
        // Field order is Thai then English, as the prompts show it
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Deserialize JSON produced by a model, tolerating a surrounding markdown code fence
pub fn parse_model_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, ModelOutputError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| ModelOutputError::Malformed(e.to_string()))
}

/// Remove a leading ```json / ``` fence and a trailing ``` fence
pub fn strip_code_fences(raw: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"^\s*```[a-zA-Z]*\s*|\s*```\s*$").expect("fence pattern is valid")
    });
    fence.replace_all(raw, "").trim().to_string()
}
