use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{CartRepository, StoreError};
use crate::models::Cart;

/// Process-local cart store used when no database is configured, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<BTreeMap<String, Cart>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.read().await.get(id).cloned())
    }

    async fn find_one_by_user_id(&self, user_id: &str) -> Result<Option<Cart>, StoreError> {
        let carts = self.carts.read().await;
        Ok(carts.values().find(|cart| cart.user_id == user_id).cloned())
    }

    async fn find_all_total_at_least(&self, threshold: Decimal) -> Result<Vec<Cart>, StoreError> {
        let carts = self.carts.read().await;
        let mut matching: Vec<Cart> = carts
            .values()
            .filter(|cart| cart.total >= threshold)
            .cloned()
            .collect();
        // stable sort keeps id order between equal totals
        matching.sort_by(|a, b| a.total.cmp(&b.total));
        Ok(matching)
    }

    async fn find_all(&self) -> Result<Vec<Cart>, StoreError> {
        Ok(self.carts.read().await.values().cloned().collect())
    }

    async fn save(&self, cart: &Cart) -> Result<Cart, StoreError> {
        self.carts
            .write()
            .await
            .insert(cart.id.clone(), cart.clone());
        Ok(cart.clone())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut carts = self.carts.write().await;
        let removed = carts.len() as u64;
        carts.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.carts.read().await.len() as u64)
    }
}
