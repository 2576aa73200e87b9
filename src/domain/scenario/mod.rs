pub mod error;
pub mod model;
pub mod service;

pub use error::ScenarioServiceError;
pub use model::{CharacterAge, Scenario, ScenarioCharacter, ScenarioPhrase, ScenarioSetting};
use serde::{Deserialize, Serialize};
pub use service::{ScenarioService, ScenarioServiceApi};
use uuid::Uuid;

/// Request for POST /api/scenario
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    pub prompt: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    pub success: bool,
    pub data: Scenario,
    pub scenario_id: Uuid,
}
