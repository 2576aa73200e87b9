use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum EditorServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("completion provider error: {0}")]
    Upstream(String),
}

impl From<EditorServiceError> for AppError {
    fn from(err: EditorServiceError) -> Self {
        match err {
            EditorServiceError::Invalid(msg) => AppError::BadRequest(msg),
            EditorServiceError::Upstream(msg) => AppError::ExternalService(msg),
        }
    }
}
