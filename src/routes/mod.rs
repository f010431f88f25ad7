use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::InteractionStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::RecommendationService,
};

pub mod products;
pub mod recommendations;
pub mod users;

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn InteractionStore>,
    pub recommender: RecommendationService,
}

impl AppState {
    pub fn new(store: Arc<dyn InteractionStore>, recommender: RecommendationService) -> Self {
        Self { store, recommender }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations/:user_id", get(recommendations::recommend))
        .route("/products", get(products::list))
        .route("/products/:product_id", get(products::get))
        .route("/categories", get(products::categories))
        .route("/users", get(users::list))
        .route("/users/:user_id", get(users::get))
        .route("/users/:user_id/interactions", get(users::interactions))
        .route("/analytics/users/:user_id", get(users::analytics))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
