use axum::{extract::State, Json};
use std::sync::Arc;

use super::parse_user_id;
use crate::{
    domain::scenario::{ScenarioRequest, ScenarioResponse, ScenarioService, ScenarioServiceApi},
    error::AppResult,
};

pub struct ScenarioController {
    scenario_service: Arc<ScenarioService>,
}

impl ScenarioController {
    pub fn new(scenario_service: Arc<ScenarioService>) -> Self {
        Self { scenario_service }
    }

    /// POST /api/scenario - Generate and save a role-play scenario
    pub async fn generate(
        State(controller): State<Arc<ScenarioController>>,
        Json(request): Json<ScenarioRequest>,
    ) -> AppResult<Json<ScenarioResponse>> {
        let user_id = parse_user_id(request.user_id.as_deref())?;

        let (scenario, scenario_id) = controller
            .scenario_service
            .generate(user_id, request.prompt.unwrap_or_default())
            .await?;

        Ok(Json(ScenarioResponse {
            success: true,
            data: scenario,
            scenario_id,
        }))
    }
}
