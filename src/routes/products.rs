use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Item, ItemId, ProductQuery},
    routes::AppState,
};

const DEFAULT_PAGE_SIZE: usize = 50;

/// Lists catalog items, optionally restricted to one category
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.store.all_items().await?;

    let page = items
        .into_iter()
        .filter(|item| {
            query
                .category
                .as_deref()
                .map_or(true, |category| item.category == category)
        })
        .skip(query.skip)
        .take(query.limit.unwrap_or(DEFAULT_PAGE_SIZE))
        .collect();

    Ok(Json(page))
}

/// Fetches a single catalog item
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<ItemId>,
) -> AppResult<Json<Item>> {
    state
        .store
        .item_by_id(product_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))
}

/// Distinct catalog categories, sorted
pub async fn categories(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    let items = state.store.all_items().await?;
    let categories: BTreeSet<String> = items.into_iter().map(|item| item.category).collect();
    Ok(Json(categories.into_iter().collect()))
}
