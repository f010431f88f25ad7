//! Read access to recorded interactions and the item catalog.
//!
//! The recommender only ever reads through this trait. Every accessor returns a full
//! snapshot; there is no streaming or partial contract.

use crate::{
    error::AppResult,
    models::{Interaction, Item, ItemId, User, UserId},
};

/// Trait for interaction/catalog stores
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InteractionStore: Send + Sync {
    /// Every interaction recorded for every user
    async fn all_interactions(&self) -> AppResult<Vec<Interaction>>;

    /// Every interaction recorded for one user
    async fn interactions_for_user(&self, user_id: UserId) -> AppResult<Vec<Interaction>>;

    /// The whole item catalog
    async fn all_items(&self) -> AppResult<Vec<Item>>;

    /// Items whose id is in `ids`; unknown ids are skipped
    async fn items_by_ids(&self, ids: &[ItemId]) -> AppResult<Vec<Item>>;

    /// Single item lookup
    async fn item_by_id(&self, id: ItemId) -> AppResult<Option<Item>>;

    /// Registered users, ordered by id
    async fn users(&self) -> AppResult<Vec<User>>;

    /// Single user lookup
    async fn user_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;

    /// Whether the user is registered
    async fn user_exists(&self, user_id: UserId) -> AppResult<bool>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
