pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{CatalogSnapshot, InMemoryStore};
pub use postgres::{create_pool, PgStore};
pub use store::InteractionStore;
