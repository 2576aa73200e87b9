use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DialogueServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("assistant provider error: {0}")]
    Upstream(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<AppError> for DialogueServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => DialogueServiceError::Invalid(msg),
            AppError::NotFound(msg) => DialogueServiceError::NotFound(msg),
            _ => DialogueServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<DialogueServiceError> for AppError {
    fn from(err: DialogueServiceError) -> Self {
        match err {
            DialogueServiceError::Invalid(msg) => AppError::BadRequest(msg),
            DialogueServiceError::NotFound(msg) => AppError::NotFound(msg),
            DialogueServiceError::Upstream(msg) => AppError::ExternalService(msg),
            DialogueServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
