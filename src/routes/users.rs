use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Interaction, Pagination, User, UserAnalytics, UserId},
    routes::AppState,
    services::analytics::user_analytics,
};

const DEFAULT_PAGE_SIZE: usize = 50;

/// Lists registered users
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.store.users().await?;

    let page = users
        .into_iter()
        .skip(page.skip)
        .take(page.limit.unwrap_or(DEFAULT_PAGE_SIZE))
        .collect();

    Ok(Json(page))
}

/// Fetches a single user
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<User>> {
    state
        .store
        .user_by_id(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

/// A user's interaction history, newest first
pub async fn interactions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<Interaction>>> {
    let mut interactions = state.store.interactions_for_user(user_id).await?;
    interactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let page = interactions
        .into_iter()
        .skip(page.skip)
        .take(page.limit.unwrap_or(DEFAULT_PAGE_SIZE))
        .collect();

    Ok(Json(page))
}

/// Behavioural summary for one user
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<UserAnalytics>> {
    let summary = user_analytics(state.store.as_ref(), user_id).await?;
    Ok(Json(summary))
}
