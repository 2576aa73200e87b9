use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("completion provider error: {0}")]
    Upstream(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<AppError> for ScenarioServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => ScenarioServiceError::Invalid(msg),
            AppError::NotFound(msg) => ScenarioServiceError::NotFound(msg),
            _ => ScenarioServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ScenarioServiceError> for AppError {
    fn from(err: ScenarioServiceError) -> Self {
        match err {
            ScenarioServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ScenarioServiceError::NotFound(msg) => AppError::NotFound(msg),
            ScenarioServiceError::Upstream(msg) => AppError::ExternalService(msg),
            ScenarioServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
