use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::RecommendationResponse,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub query: String,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        query_len = request.query.len(),
        "Processing recommendation request"
    );

    let outcome = state.recommender.recommend(&request.query).await?;

    tracing::info!(
        request_id = %request_id,
        source = %outcome.source,
        count = outcome.recommendations.len(),
        "Recommendations ready"
    );

    Ok(Json(RecommendationResponse {
        recommendations: outcome.recommendations,
        source: outcome.source,
        generated_at: Utc::now(),
    }))
}
