use super::cache::AudioCacheError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("upload verification failed: {0}")]
    Unverified(String),
}

impl From<AudioCacheError> for TtsServiceError {
    fn from(err: AudioCacheError) -> Self {
        TtsServiceError::Dependency(err.to_string())
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
            TtsServiceError::Unverified(msg) => AppError::ExternalService(msg),
        }
    }
}
