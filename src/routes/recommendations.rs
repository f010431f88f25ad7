use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationQuery, RecommendationResponse, UserId},
    routes::AppState,
};

const NOT_ENOUGH_DATA: &str =
    "Not enough data for personalized recommendations yet. Start browsing!";

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let n = query.n.unwrap_or(state.recommender.config().default_count);

    tracing::info!(
        request_id = %request_id,
        user_id,
        n,
        include_serendipity = query.include_serendipity,
        "Processing recommendation request"
    );

    if !state.store.user_exists(user_id).await? {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }

    let recommendations = match state
        .recommender
        .get_recommendations(user_id, n, query.include_serendipity)
        .await
    {
        Ok(recommendations) => recommendations,
        Err(AppError::Scoring(e)) => {
            tracing::warn!(
                request_id = %request_id,
                user_id,
                error = %e,
                "Scoring had too little data"
            );
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    tracing::info!(
        request_id = %request_id,
        user_id,
        count = recommendations.len(),
        "Recommendations completed"
    );

    let message = recommendations
        .is_empty()
        .then(|| NOT_ENOUGH_DATA.to_string());

    Ok(Json(RecommendationResponse {
        user_id,
        count: recommendations.len(),
        recommendations,
        message,
    }))
}
