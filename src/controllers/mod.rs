pub mod edit;
pub mod health;
pub mod pronunciation;
pub mod recommend;
pub mod scenario;
pub mod thread;
pub mod tts;
pub mod user;

use crate::error::{AppError, AppResult};
use uuid::Uuid;

/// Parse the `userId` every user-scoped request body carries
pub(crate) fn parse_user_id(raw: Option<&str>) -> AppResult<Uuid> {
    let raw = raw
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))?;

    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("userId must be a valid UUID".to_string()))
}
