use serde::{Deserialize, Serialize};

use super::ItemId;

/// A catalog item as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Average customer rating on a 0-5 scale
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i32,
}

impl Item {
    /// Creates an item with no description, tags, image or stock
    pub fn new(id: ItemId, name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            description: None,
            tags: Vec::new(),
            image_url: None,
            rating: 0.0,
            stock: 0,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Text used to build the item's content profile: name, category and tags
    pub fn profile_text(&self) -> String {
        format!("{} {} {}", self.name, self.category, self.tags.join(" "))
    }
}
