use std::sync::Arc;

use hybrid_recommender::{
    config::Config,
    db::{create_pool, InMemoryStore, InteractionStore, PgStore},
    routes::{create_router, AppState},
    services::RecommendationService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hybrid_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let recommender_config = config.recommender()?;

    let store: Arc<dyn InteractionStore> = match &config.catalog_file {
        Some(path) => Arc::new(InMemoryStore::from_json_file(path)?),
        None => {
            let pool = create_pool(&config.database_url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
    };

    tracing::info!(
        store = store.name(),
        min_interactions = recommender_config.min_interactions,
        serendipity_factor = recommender_config.serendipity_factor,
        "Recommender configured"
    );

    let recommender = RecommendationService::new(store.clone(), recommender_config);
    let state = Arc::new(AppState::new(store, recommender));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
