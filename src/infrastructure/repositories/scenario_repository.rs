use crate::domain::scenario::Scenario;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    /// Store a validated scenario for `user_id`, returning its id
    async fn create(&self, user_id: Uuid, scenario: &Scenario) -> AppResult<Uuid>;
}

pub struct PgScenarioRepository {
    pool: Arc<DbPool>,
}

impl PgScenarioRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScenarioRepository for PgScenarioRepository {
    async fn create(&self, user_id: Uuid, scenario: &Scenario) -> AppResult<Uuid> {
        let pool = self.pool.as_ref();

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO scenarios (id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(scenario))
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(id)
    }
}
