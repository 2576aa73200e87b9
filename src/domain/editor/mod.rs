pub mod error;
pub mod service;

use crate::domain::shared::CandidateResponse;
pub use error::EditorServiceError;
use serde::{Deserialize, Serialize};
pub use service::{EditorService, EditorServiceApi};
use uuid::Uuid;

/// The response being edited, as the client sends it: either just its
/// text or the full candidate it was shown
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectedResponse {
    Text(String),
    Candidate(SelectedCandidate),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCandidate {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub native_text: String,
    #[serde(default)]
    pub translated_text: String,
    #[serde(default)]
    pub source_utterance_id: Option<String>,
}

impl From<SelectedResponse> for CandidateResponse {
    fn from(selected: SelectedResponse) -> Self {
        match selected {
            SelectedResponse::Text(text) => CandidateResponse {
                id: Uuid::new_v4(),
                native_text: text,
                translated_text: String::new(),
                source_utterance_id: None,
            },
            SelectedResponse::Candidate(candidate) => CandidateResponse {
                id: candidate.id.unwrap_or_else(Uuid::new_v4),
                native_text: candidate.native_text,
                translated_text: candidate.translated_text,
                source_utterance_id: candidate.source_utterance_id,
            },
        }
    }
}

/// Request for POST /api/edit
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    /// Free-text instruction, e.g. "make it more polite"
    #[serde(default)]
    pub input: String,
    pub selected_response: Option<SelectedResponse>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub success: bool,
    pub data: CandidateResponse,
}
