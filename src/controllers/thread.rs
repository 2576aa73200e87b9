use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::parse_user_id;
use crate::{
    domain::dialogue::{
        DialogueService, DialogueServiceApi, ThreadHistoryResponse, ThreadRequest, ThreadResponse,
    },
    error::AppResult,
};

pub struct ThreadController {
    dialogue_service: Arc<DialogueService>,
}

impl ThreadController {
    pub fn new(dialogue_service: Arc<DialogueService>) -> Self {
        Self { dialogue_service }
    }

    /// POST /api/thread - Advance the conversation by one turn
    pub async fn advance(
        State(controller): State<Arc<ThreadController>>,
        Json(request): Json<ThreadRequest>,
    ) -> AppResult<Json<ThreadResponse>> {
        let user_id = parse_user_id(request.user_id.as_deref())?;

        let turn = controller
            .dialogue_service
            .advance(user_id, request.thread_id, request.input)
            .await?;

        Ok(Json(turn.into()))
    }

    /// GET /api/thread/:threadId - Conversation history, oldest first
    pub async fn history(
        State(controller): State<Arc<ThreadController>>,
        Path(thread_id): Path<String>,
    ) -> AppResult<Json<ThreadHistoryResponse>> {
        let history = controller.dialogue_service.history(&thread_id).await?;

        Ok(Json(ThreadHistoryResponse {
            success: true,
            thread_id,
            history,
        }))
    }
}
