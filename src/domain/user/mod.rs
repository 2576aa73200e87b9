pub mod error;
pub mod model;
pub mod service;

pub use error::UserServiceError;
pub use model::User;
use serde::{Deserialize, Serialize};
pub use service::{UserService, UserServiceApi};

/// Request for POST /api/users
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    pub tg_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}
