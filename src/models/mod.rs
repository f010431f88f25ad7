use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod interaction;
mod item;
mod recommendation;
mod user;

pub use interaction::{Interaction, InteractionKind};
pub use item::Item;
pub use recommendation::{Candidate, RankedRecommendation, Source};
pub use user::User;

/// Identifier of a user in the interaction store
pub type UserId = i64;

/// Identifier of a catalog item
pub type ItemId = i64;

// ============================================================================
// API Types
// ============================================================================

fn default_include_serendipity() -> bool {
    true
}

/// Query parameters for the recommendations endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Number of recommendations, falls back to the configured default
    pub n: Option<usize>,
    #[serde(default = "default_include_serendipity")]
    pub include_serendipity: bool,
}

/// Response body of the recommendations endpoint
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub user_id: UserId,
    pub count: usize,
    pub recommendations: Vec<RankedRecommendation>,
    /// Present when there was not enough data to recommend anything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pagination parameters shared by listing endpoints
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    pub limit: Option<usize>,
}

/// Query parameters for product listing
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub skip: usize,
    pub limit: Option<usize>,
}

/// Behavioural summary of one user
#[derive(Debug, Serialize, PartialEq)]
pub struct UserAnalytics {
    pub user_id: UserId,
    pub total_interactions: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub categories_explored: BTreeMap<String, usize>,
    pub total_purchases: usize,
    pub total_spent: f64,
    pub favorite_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
