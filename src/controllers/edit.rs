use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::editor::{EditRequest, EditResponse, EditorService, EditorServiceApi},
    domain::shared::CandidateResponse,
    error::{AppError, AppResult},
};

pub struct EditController {
    editor_service: Arc<EditorService>,
}

impl EditController {
    pub fn new(editor_service: Arc<EditorService>) -> Self {
        Self { editor_service }
    }

    /// POST /api/edit - Rewrite a candidate reply per the learner's instruction
    pub async fn edit(
        State(controller): State<Arc<EditController>>,
        Json(request): Json<EditRequest>,
    ) -> AppResult<Json<EditResponse>> {
        let candidate: CandidateResponse = request
            .selected_response
            .ok_or_else(|| {
                AppError::BadRequest("Input and selected response are required".to_string())
            })?
            .into();

        let edited = controller
            .editor_service
            .edit(&candidate, &request.input)
            .await?;

        Ok(Json(EditResponse {
            success: true,
            data: edited,
        }))
    }
}
