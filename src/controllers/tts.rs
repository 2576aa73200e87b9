use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::tts::{AudioArtifact, TtsRequest, TtsService, TtsServiceApi},
    error::AppResult,
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts - Synthesize text and return the hosted audio file
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<Json<AudioArtifact>> {
        let artifact = controller
            .tts_service
            .synthesize(request.text, request.language, request.voice_options)
            .await?;

        Ok(Json(artifact))
    }
}
