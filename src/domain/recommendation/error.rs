use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum RecommendationServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("completion provider error: {0}")]
    Upstream(String),
}

impl From<RecommendationServiceError> for AppError {
    fn from(err: RecommendationServiceError) -> Self {
        match err {
            RecommendationServiceError::Invalid(msg) => AppError::BadRequest(msg),
            RecommendationServiceError::Upstream(msg) => AppError::ExternalService(msg),
        }
    }
}
