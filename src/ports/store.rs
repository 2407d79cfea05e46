//! Order persistence contract and an in-memory backend.

use crate::model::{Order, OrderId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised by an order store backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persistence for order records.
///
/// Implementations must be safe to share between several order manager
/// instances and must make a stored order visible to the next `get` from the
/// same caller.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Returns `Ok(None)` when no order exists for `id`.
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    async fn store(&self, order: &Order) -> Result<(), StoreError>;
}

/// In-memory store.
///
/// Orders live in a `HashMap` behind a read-write lock; nothing survives a
/// restart.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.get(id).cloned())
    }

    async fn store(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order.clone());
        Ok(())
    }
}
