use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::pronunciation::{
        PronunciationAssessmentRequest, PronunciationAssessmentResponse, PronunciationService,
        PronunciationServiceApi,
    },
    error::AppResult,
};

pub struct PronunciationController {
    pronunciation_service: Arc<PronunciationService>,
}

impl PronunciationController {
    pub fn new(pronunciation_service: Arc<PronunciationService>) -> Self {
        Self {
            pronunciation_service,
        }
    }

    /// POST /api/pronunciation - Score a recorded attempt at a reference text
    pub async fn assess(
        State(controller): State<Arc<PronunciationController>>,
        Json(request): Json<PronunciationAssessmentRequest>,
    ) -> AppResult<Json<PronunciationAssessmentResponse>> {
        let assessment = controller
            .pronunciation_service
            .assess(request.reference_text, request.audio_data, request.language)
            .await?;

        Ok(Json(PronunciationAssessmentResponse {
            success: true,
            assessment,
        }))
    }
}
