use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use crate::{
    error::AppResult,
    models::{Interaction, InteractionKind, Item, ItemId, User, UserId},
};

use super::InteractionStore;

const ITEM_COLUMNS: &str =
    "id, name, category, price, description, tags, image_url, rating, stock";
const USER_COLUMNS: &str = "id, email, name";
const INTERACTION_COLUMNS: &str =
    "id, user_id, product_id, interaction_type, rating, created_at";

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    category: String,
    price: f64,
    description: Option<String>,
    tags: Vec<String>,
    image_url: Option<String>,
    rating: f64,
    stock: i32,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            description: row.description,
            tags: row.tags,
            image_url: row.image_url,
            rating: row.rating,
            stock: row.stock,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.id, row.email, row.name)
    }
}

#[derive(Debug, FromRow)]
struct InteractionRow {
    id: i64,
    user_id: i64,
    product_id: i64,
    interaction_type: String,
    rating: Option<f64>,
    created_at: DateTime<Utc>,
}

impl From<InteractionRow> for Interaction {
    fn from(row: InteractionRow) -> Self {
        Interaction {
            id: row.id,
            user_id: row.user_id,
            item_id: row.product_id,
            kind: InteractionKind::from(row.interaction_type),
            rating: row.rating,
            timestamp: row.created_at,
        }
    }
}

/// Interaction store backed by the `users`, `products` and `interactions` tables
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl InteractionStore for PgStore {
    async fn all_interactions(&self) -> AppResult<Vec<Interaction>> {
        let query = format!("SELECT {} FROM interactions ORDER BY id", INTERACTION_COLUMNS);
        let rows = sqlx::query_as::<_, InteractionRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Interaction::from).collect())
    }

    async fn interactions_for_user(&self, user_id: UserId) -> AppResult<Vec<Interaction>> {
        let query = format!(
            "SELECT {} FROM interactions WHERE user_id = $1 ORDER BY id",
            INTERACTION_COLUMNS
        );
        let rows = sqlx::query_as::<_, InteractionRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Interaction::from).collect())
    }

    async fn all_items(&self) -> AppResult<Vec<Item>> {
        let query = format!("SELECT {} FROM products ORDER BY id", ITEM_COLUMNS);
        let rows = sqlx::query_as::<_, ItemRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn items_by_ids(&self, ids: &[ItemId]) -> AppResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM products WHERE id = ANY($1) ORDER BY id",
            ITEM_COLUMNS
        );
        let rows = sqlx::query_as::<_, ItemRow>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn item_by_id(&self, id: ItemId) -> AppResult<Option<Item>> {
        let query = format!("SELECT {} FROM products WHERE id = $1", ITEM_COLUMNS);
        let row = sqlx::query_as::<_, ItemRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Item::from))
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn user_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn user_exists(&self, user_id: UserId) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
