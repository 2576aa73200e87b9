use crate::infrastructure::db::{check_connection, DbPool};
use crate::{domain::user::User, error::AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Repository for learners and their assistant mapping
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_tg_id(&self, tg_id: &str) -> AppResult<Option<User>>;

    /// Insert a user or refresh the name of the one with the same `tg_id`
    async fn upsert(&self, tg_id: &str, name: &str) -> AppResult<User>;

    async fn set_assistant_id(&self, user_id: Uuid, assistant_id: &str) -> AppResult<()>;

    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}

pub struct PgUserRepository {
    pool: Arc<DbPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    async fn find_by_tg_id(&self, tg_id: &str) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE tg_id = $1")
            .bind(tg_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    async fn upsert(&self, tg_id: &str, name: &str) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, tg_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (tg_id) DO UPDATE
            SET name = EXCLUDED.name, updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(tg_id)
        .bind(name)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    async fn set_assistant_id(&self, user_id: Uuid, assistant_id: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();

        sqlx::query("UPDATE users SET assistant_id = $1, updated_at = $2 WHERE id = $3")
            .bind(assistant_id)
            .bind(chrono::Utc::now())
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        check_connection(self.pool.as_ref()).await?;
        Ok(())
    }
}
