use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::recommendation::{
        RecommendRequest, RecommendResponse, RecommendationService, RecommendationServiceApi,
    },
    error::AppResult,
};

pub struct RecommendController {
    recommendation_service: Arc<RecommendationService>,
}

impl RecommendController {
    pub fn new(recommendation_service: Arc<RecommendationService>) -> Self {
        Self {
            recommendation_service,
        }
    }

    /// POST /api/recommend - Three candidate replies to an agent line
    pub async fn recommend(
        State(controller): State<Arc<RecommendController>>,
        Json(request): Json<RecommendRequest>,
    ) -> AppResult<Json<RecommendResponse>> {
        let recommendations = controller
            .recommendation_service
            .recommend(request.response, request.source_utterance_id)
            .await?;

        Ok(Json(RecommendResponse {
            success: true,
            recommendations,
        }))
    }
}
