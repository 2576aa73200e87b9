use super::error::UserServiceError;
use super::User;
use crate::infrastructure::repositories::UserRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
pub trait UserServiceApi: Send + Sync {
    /// Create the user for `tg_id`, or update the name of the existing one
    async fn upsert(&self, tg_id: String, name: String) -> Result<User, UserServiceError>;

    async fn find_by_tg_id(&self, tg_id: &str) -> Result<User, UserServiceError>;
}

#[async_trait]
impl UserServiceApi for UserService {
    async fn upsert(&self, tg_id: String, name: String) -> Result<User, UserServiceError> {
        let tg_id = tg_id.trim();
        let name = name.trim();
        if tg_id.is_empty() || name.is_empty() {
            return Err(UserServiceError::Invalid(
                "tgId and name are required".to_string(),
            ));
        }

        let user = self.user_repo.upsert(tg_id, name).await?;
        tracing::info!(user_id = %user.id, tg_id, "User upserted");

        Ok(user)
    }

    async fn find_by_tg_id(&self, tg_id: &str) -> Result<User, UserServiceError> {
        self.user_repo
            .find_by_tg_id(tg_id)
            .await?
            .ok_or(UserServiceError::NotFound)
    }
}
