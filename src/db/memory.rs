use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::{
    error::AppResult,
    models::{Interaction, Item, ItemId, User, UserId},
};

use super::InteractionStore;

/// Point-in-time copy of users, catalog and interactions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// Interaction store over an immutable in-process snapshot
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    users: Vec<User>,
    known_users: HashSet<UserId>,
    items: Vec<Item>,
    interactions: Vec<Interaction>,
}

impl InMemoryStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        // Anyone with recorded activity counts as a known user
        let known_users = snapshot
            .users
            .iter()
            .map(|user| user.id)
            .chain(snapshot.interactions.iter().map(|i| i.user_id))
            .collect();

        let mut users = snapshot.users;
        users.sort_by_key(|user| user.id);

        Self {
            users,
            known_users,
            items: snapshot.items,
            interactions: snapshot.interactions,
        }
    }

    /// Loads a JSON snapshot from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid catalog snapshot {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            users = snapshot.users.len(),
            items = snapshot.items.len(),
            interactions = snapshot.interactions.len(),
            "Loaded catalog snapshot"
        );

        Ok(Self::new(snapshot))
    }
}

#[async_trait::async_trait]
impl InteractionStore for InMemoryStore {
    async fn all_interactions(&self) -> AppResult<Vec<Interaction>> {
        Ok(self.interactions.clone())
    }

    async fn interactions_for_user(&self, user_id: UserId) -> AppResult<Vec<Interaction>> {
        Ok(self
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn all_items(&self) -> AppResult<Vec<Item>> {
        Ok(self.items.clone())
    }

    async fn items_by_ids(&self, ids: &[ItemId]) -> AppResult<Vec<Item>> {
        let wanted: HashSet<ItemId> = ids.iter().copied().collect();
        Ok(self
            .items
            .iter()
            .filter(|item| wanted.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn item_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.clone())
    }

    async fn user_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|user| user.id == user_id).cloned())
    }

    async fn user_exists(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.known_users.contains(&user_id))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InteractionKind;
    use chrono::Utc;

    fn create_store() -> InMemoryStore {
        InMemoryStore::new(CatalogSnapshot {
            users: vec![
                User::new(3, "cy@example.com", "Cy"),
                User::new(1, "ana@example.com", "Ana"),
                User::new(2, "bo@example.com", "Bo"),
            ],
            items: vec![
                Item::new(10, "Espresso Machine Deluxe", "Home & Kitchen", 399.99),
                Item::new(11, "Air Fryer 5.8 Quart", "Home & Kitchen", 129.99),
            ],
            interactions: vec![
                Interaction::new(1, 1, 10, InteractionKind::View, Utc::now()),
                Interaction::new(2, 2, 11, InteractionKind::Purchase, Utc::now()),
                Interaction::new(3, 4, 11, InteractionKind::Cart, Utc::now()),
            ],
        })
    }

    #[tokio::test]
    async fn test_interactions_for_user() {
        let store = create_store();
        let interactions = store.interactions_for_user(2).await.unwrap();
        assert_eq!(interactions.len(), 1);
        assert_eq!(interactions[0].item_id, 11);
    }

    #[tokio::test]
    async fn test_items_by_ids_skips_unknown() {
        let store = create_store();
        let items = store.items_by_ids(&[11, 99]).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Air Fryer 5.8 Quart");
    }

    #[tokio::test]
    async fn test_users_are_ordered_by_id() {
        let store = create_store();
        let ids: Vec<UserId> = store.users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let user = store.user_by_id(2).await.unwrap().unwrap();
        assert_eq!(user.email, "bo@example.com");
        assert!(store.user_by_id(4).await.unwrap().is_none());
    }

    #[test]
    fn test_snapshot_without_weights_loads() {
        let json = r#"{
            "users": [{"id": 1, "email": "ana@example.com", "name": "Ana"}],
            "items": [{"id": 10, "name": "Espresso Machine Deluxe", "category": "Home & Kitchen", "price": 399.99}],
            "interactions": [
                {"id": 1, "user_id": 1, "item_id": 10, "kind": "cart", "timestamp": "2024-01-01T00:00:00Z"}
            ]
        }"#;
        let snapshot: CatalogSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.interactions[0].weight(), 2.0);
        assert_eq!(InMemoryStore::new(snapshot).users.len(), 1);
    }

    #[tokio::test]
    async fn test_user_exists_includes_users_with_activity() {
        let store = create_store();
        assert!(store.user_exists(3).await.unwrap());
        assert!(store.user_exists(4).await.unwrap());
        assert!(!store.user_exists(5).await.unwrap());
    }
}
