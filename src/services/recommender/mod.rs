//! Hybrid recommendation engine.
//!
//! Users with enough history are scored by blending collaborative filtering with
//! content similarity, then topped up with a few out-of-profile picks. Everyone else
//! gets the catalog-wide popularity ranking. Every call recomputes from a fresh
//! store snapshot; nothing is cached between requests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use crate::{
    config::RecommenderConfig,
    db::InteractionStore,
    error::{AppError, AppResult},
    models::{Interaction, ItemId, RankedRecommendation, UserId},
};

pub mod collaborative;
pub mod content;
pub mod matrix;
pub mod merge;
pub mod popularity;
pub mod ranking;
pub mod serendipity;
pub mod similarity;
pub mod text;

pub use collaborative::collaborative_candidates;
pub use content::content_candidates;
pub use merge::merge_candidates;
pub use popularity::popularity_candidates;
pub use serendipity::inject_serendipity;

/// Failures inside the scoring pipeline
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Empty vocabulary: item text profiles contain only stop words")]
    EmptyVocabulary,
}

/// Entry point used by the HTTP layer
pub struct RecommendationService {
    store: Arc<dyn InteractionStore>,
    config: RecommenderConfig,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn InteractionStore>, config: RecommenderConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Top `n` unseen items for `user_id`, best first
    ///
    /// An empty result means there was not enough data, not a failure.
    pub async fn get_recommendations(
        &self,
        user_id: UserId,
        n: usize,
        include_serendipity: bool,
    ) -> AppResult<Vec<RankedRecommendation>> {
        if n == 0 {
            return Err(AppError::InvalidInput(
                "Number of recommendations must be at least 1".to_string(),
            ));
        }

        let history = self.store.interactions_for_user(user_id).await?;

        if history.len() < self.config.min_interactions {
            tracing::info!(
                user_id,
                history = history.len(),
                threshold = self.config.min_interactions,
                "Cold start, using popularity ranking"
            );
            return self.cold_start(n).await;
        }

        self.warm_start(user_id, &history, n, include_serendipity).await
    }

    async fn cold_start(&self, n: usize) -> AppResult<Vec<RankedRecommendation>> {
        let interactions = self.store.all_interactions().await?;
        let candidates = popularity_candidates(&interactions, n);

        let ids: Vec<ItemId> = candidates.iter().map(|c| c.item_id).collect();
        let items = self.store.items_by_ids(&ids).await?;

        Ok(ranking::enrich(candidates, &items))
    }

    async fn warm_start(
        &self,
        user_id: UserId,
        history: &[Interaction],
        n: usize,
        include_serendipity: bool,
    ) -> AppResult<Vec<RankedRecommendation>> {
        let interactions = self.store.all_interactions().await?;
        let catalog = self.store.all_items().await?;

        let collaborative = collaborative_candidates(user_id, &interactions);
        let content = content_candidates(history, &catalog)?;

        tracing::info!(
            user_id,
            collaborative = collaborative.len(),
            content = content.len(),
            "Warm start scoring completed"
        );

        let mut candidates = merge_candidates(collaborative, content);

        if include_serendipity {
            let mut rng = self.rng();
            inject_serendipity(
                &mut candidates,
                history,
                &catalog,
                self.config.serendipity_factor,
                &mut rng,
            );
        }

        let top = ranking::rank(candidates, n);
        Ok(ranking::enrich(top, &catalog))
    }

    /// Fresh generator per call, reproducible when a seed is configured
    fn rng(&self) -> StdRng {
        match self.config.serendipity_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MockInteractionStore;
    use crate::models::{InteractionKind, Item};
    use chrono::Utc;

    fn interaction(user_id: UserId, item_id: ItemId, kind: InteractionKind) -> Interaction {
        Interaction::new(0, user_id, item_id, kind, Utc::now())
    }

    fn catalog() -> Vec<Item> {
        vec![
            Item::new(1, "Wireless Noise-Canceling Headphones", "Electronics", 299.99)
                .with_tags(["audio", "wireless", "premium"])
                .with_rating(4.7),
            Item::new(2, "4K Smart TV", "Electronics", 599.99)
                .with_tags(["tv", "smart"])
                .with_rating(4.5),
            Item::new(3, "Wireless Gaming Mouse", "Electronics", 79.99)
                .with_tags(["gaming", "wireless"])
                .with_rating(4.6),
            Item::new(4, "USB-C Hub", "Electronics", 39.99)
                .with_tags(["accessories", "usb"])
                .with_rating(4.4),
            Item::new(5, "Yoga Mat Premium", "Sports & Outdoors", 49.99)
                .with_tags(["yoga", "fitness"])
                .with_rating(4.8),
            Item::new(6, "Running Shoes Pro", "Fashion", 149.99)
                .with_tags(["shoes", "sports"])
                .with_rating(4.8),
        ]
    }

    fn global_interactions() -> Vec<Interaction> {
        vec![
            interaction(1, 1, InteractionKind::View),
            interaction(1, 2, InteractionKind::View),
            interaction(2, 5, InteractionKind::Purchase),
            interaction(3, 5, InteractionKind::Purchase),
            interaction(2, 6, InteractionKind::Cart),
        ]
    }

    #[tokio::test]
    async fn test_cold_start_never_scans_catalog() {
        let mut store = MockInteractionStore::new();
        store
            .expect_interactions_for_user()
            .returning(|_| {
                Ok(vec![
                    interaction(1, 1, InteractionKind::View),
                    interaction(1, 2, InteractionKind::View),
                ])
            });
        store
            .expect_all_interactions()
            .times(1)
            .returning(|| Ok(global_interactions()));
        store.expect_items_by_ids().times(1).returning(|ids| {
            Ok(catalog()
                .into_iter()
                .filter(|item| ids.contains(&item.id))
                .collect())
        });
        store.expect_all_items().never();

        let service = RecommendationService::new(Arc::new(store), RecommenderConfig::default());
        let recommendations = service.get_recommendations(1, 10, true).await.unwrap();

        let ranked: Vec<(ItemId, f64)> = recommendations
            .iter()
            .map(|r| (r.item_id, r.score))
            .collect();
        // Popularity does not exclude the user's own views of items 1 and 2
        assert_eq!(ranked, vec![(5, 10.0), (6, 2.0), (1, 1.0), (2, 1.0)]);
        assert!(recommendations.iter().all(|r| r.source == "popularity"));
    }

    #[tokio::test]
    async fn test_warm_start_blends_and_excludes_seen_items() {
        let history = vec![
            interaction(1, 1, InteractionKind::View),
            interaction(1, 2, InteractionKind::Cart),
            interaction(1, 3, InteractionKind::Purchase),
        ];
        let mut everyone = history.clone();
        everyone.extend([
            interaction(2, 1, InteractionKind::View),
            interaction(2, 2, InteractionKind::Cart),
            interaction(2, 3, InteractionKind::Purchase),
            interaction(2, 4, InteractionKind::Purchase),
        ]);

        let mut store = MockInteractionStore::new();
        let user_history = history.clone();
        store
            .expect_interactions_for_user()
            .returning(move |_| Ok(user_history.clone()));
        store
            .expect_all_interactions()
            .returning(move || Ok(everyone.clone()));
        store.expect_all_items().returning(|| Ok(catalog()));
        store.expect_items_by_ids().never();

        let service = RecommendationService::new(
            Arc::new(store),
            RecommenderConfig::default().with_seed(42),
        );
        let recommendations = service.get_recommendations(1, 10, false).await.unwrap();

        assert!(!recommendations.is_empty());
        assert!(recommendations.iter().all(|r| ![1, 2, 3].contains(&r.item_id)));
        let hub = recommendations.iter().find(|r| r.item_id == 4).unwrap();
        assert!(hub.source.contains("collaborative"));
        assert!(recommendations
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[tokio::test]
    async fn test_zero_count_rejected_before_scoring() {
        let mut store = MockInteractionStore::new();
        store.expect_interactions_for_user().never();

        let service = RecommendationService::new(Arc::new(store), RecommenderConfig::default());
        let result = service.get_recommendations(1, 0, true).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockInteractionStore::new();
        store
            .expect_interactions_for_user()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = RecommendationService::new(Arc::new(store), RecommenderConfig::default());
        let result = service.get_recommendations(1, 5, true).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
