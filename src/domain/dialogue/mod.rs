pub mod error;
pub mod persona;
pub mod service;

use crate::domain::shared::Utterance;
pub use error::DialogueServiceError;
pub use persona::{fallback_reply, greeting, AssistantPersona};
use serde::{Deserialize, Serialize};
pub use service::{DialogueService, DialogueServiceApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRole {
    User,
    Assistant,
}

/// A message as stored in the provider's thread
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadMessage {
    pub id: String,
    pub role: ThreadRole,
    pub content: String,
}

/// Outcome of one turn: the agent's line and where the conversation lives
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub utterance: Utterance,
    pub thread_id: String,
    pub assistant_id: String,
}

/// Request for POST /api/thread
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRequest {
    pub user_id: Option<String>,
    pub input: Option<String>,
    pub thread_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub success: bool,
    pub data: Utterance,
    pub thread_id: String,
    pub assistant_id: String,
}

impl From<TurnResult> for ThreadResponse {
    fn from(turn: TurnResult) -> Self {
        Self {
            success: true,
            data: turn.utterance,
            thread_id: turn.thread_id,
            assistant_id: turn.assistant_id,
        }
    }
}

/// Response for GET /api/thread/:thread_id
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadHistoryResponse {
    pub success: bool,
    pub thread_id: String,
    pub history: Vec<Utterance>,
}
