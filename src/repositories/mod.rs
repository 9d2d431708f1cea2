use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Cart;

pub mod indexes;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryCartRepository;
pub use postgres::PgCartRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("malformed cart document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Document-style accessor over stored carts, keyed by cart id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Cart>, StoreError>;

    /// First cart owned by `user_id`, by ascending cart id.
    async fn find_one_by_user_id(&self, user_id: &str) -> Result<Option<Cart>, StoreError>;

    /// Carts whose total is greater than or equal to `threshold`, ascending by total.
    async fn find_all_total_at_least(&self, threshold: Decimal) -> Result<Vec<Cart>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Cart>, StoreError>;

    /// Inserts the cart or replaces the stored document with the same id.
    async fn save(&self, cart: &Cart) -> Result<Cart, StoreError>;

    /// Removes every cart and returns how many were deleted.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
