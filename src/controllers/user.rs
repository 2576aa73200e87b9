use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::user::{UpsertUserRequest, UserResponse, UserService, UserServiceApi},
    error::AppResult,
};

pub struct UserController {
    user_service: Arc<UserService>,
}

impl UserController {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }

    /// POST /api/users - Register a Telegram user or refresh their name
    pub async fn upsert(
        State(controller): State<Arc<UserController>>,
        Json(request): Json<UpsertUserRequest>,
    ) -> AppResult<Json<UserResponse>> {
        let user = controller
            .user_service
            .upsert(
                request.tg_id.unwrap_or_default(),
                request.name.unwrap_or_default(),
            )
            .await?;

        Ok(Json(UserResponse {
            success: true,
            user,
        }))
    }

    /// GET /api/users/:tgId - Look up a user by Telegram id
    pub async fn get_by_tg_id(
        State(controller): State<Arc<UserController>>,
        Path(tg_id): Path<String>,
    ) -> AppResult<Json<UserResponse>> {
        let user = controller.user_service.find_by_tg_id(&tg_id).await?;

        Ok(Json(UserResponse {
            success: true,
            user,
        }))
    }
}
