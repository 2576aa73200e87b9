use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PronunciationServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<PronunciationServiceError> for AppError {
    fn from(err: PronunciationServiceError) -> Self {
        match err {
            PronunciationServiceError::Invalid(msg) => AppError::BadRequest(msg),
            PronunciationServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
