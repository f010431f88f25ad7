use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{ItemId, UserId};

/// Kind of engagement a user had with an item
///
/// Unknown kinds coming from upstream tracking are kept verbatim and weigh the
/// same as a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionKind {
    View,
    Cart,
    Wishlist,
    Rating,
    Purchase,
    Other(String),
}

impl InteractionKind {
    /// Implicit-feedback strength of this kind
    pub fn weight(&self) -> f64 {
        match self {
            InteractionKind::View => 1.0,
            InteractionKind::Cart => 2.0,
            InteractionKind::Wishlist => 3.0,
            InteractionKind::Rating => 4.0,
            InteractionKind::Purchase => 5.0,
            InteractionKind::Other(_) => 1.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Cart => "cart",
            InteractionKind::Wishlist => "wishlist",
            InteractionKind::Rating => "rating",
            InteractionKind::Purchase => "purchase",
            InteractionKind::Other(kind) => kind,
        }
    }
}

impl From<String> for InteractionKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "view" => InteractionKind::View,
            "cart" => InteractionKind::Cart,
            "wishlist" => InteractionKind::Wishlist,
            "rating" => InteractionKind::Rating,
            "purchase" => InteractionKind::Purchase,
            _ => InteractionKind::Other(kind),
        }
    }
}

impl From<InteractionKind> for String {
    fn from(kind: InteractionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded user-item interaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub id: i64,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub kind: InteractionKind,
    /// Explicit star rating, only present for `rating` interactions
    #[serde(default)]
    pub rating: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        id: i64,
        user_id: UserId,
        item_id: ItemId,
        kind: InteractionKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            item_id,
            kind,
            rating: None,
            timestamp,
        }
    }

    /// Engagement strength; always follows `kind`
    pub fn weight(&self) -> f64 {
        self.kind.weight()
    }
}
