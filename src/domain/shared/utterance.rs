use super::bilingual::BilingualText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Agent,
}

/// One message line in the chat: native (Thai) text plus its translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utterance {
    pub id: String,
    pub native_text: String,
    pub translated_text: String,
    pub speaker: Speaker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Utterance {
    pub fn agent(id: impl Into<String>, text: BilingualText) -> Self {
        Self {
            id: id.into(),
            native_text: text.thai,
            translated_text: text.english,
            speaker: Speaker::Agent,
            audio_url: None,
        }
    }

    /// User lines are posted as plain Thai; no translation travels with them
    pub fn user(id: impl Into<String>, native_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            native_text: native_text.into(),
            translated_text: String::new(),
            speaker: Speaker::User,
            audio_url: None,
        }
    }

    /// Attach synthesized audio. The first URL wins; returns false if one was already set.
    ///
    /// No server operation fills `audio_url`: the client synthesizes through
    /// `/api/tts` and attaches the returned URL to its copy of the utterance.
    pub fn attach_audio(&mut self, url: impl Into<String>) -> bool {
        if self.audio_url.is_some() {
            return false;
        }
        self.audio_url = Some(url.into());
        true
    }
}

/// A user-selectable next line, shown before it is sent as a real turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: Uuid,
    pub native_text: String,
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_utterance_id: Option<String>,
}

impl CandidateResponse {
    pub fn new(text: BilingualText, source_utterance_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            native_text: text.thai,
            translated_text: text.english,
            source_utterance_id,
        }
    }
}
