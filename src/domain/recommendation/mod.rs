pub mod error;
pub mod service;

use crate::domain::shared::CandidateResponse;
pub use error::RecommendationServiceError;
use serde::{Deserialize, Serialize};
pub use service::{RecommendationService, RecommendationServiceApi, CANDIDATE_COUNT};

/// Request for POST /api/recommend
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// The agent line (and any surrounding context) to reply to
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub source_utterance_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendations: Vec<CandidateResponse>,
}
