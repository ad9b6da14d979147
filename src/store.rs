//! Record store contract and the in-memory adapter. The DynamoDB adapter lives in `store::dynamodb`.

pub mod dynamodb;

use crate::error::StoreError;
use crate::model::Product;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

pub use dynamodb::{DynamoDbConfig, DynamoDbStore};

/// Default table name for product records.
pub const DEFAULT_TABLE_NAME: &str = "ProductsTable";

/// Key-value persistence for products, keyed by `productID`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert or replace.
    async fn put(&self, product: &Product) -> Result<(), StoreError>;

    /// `Ok(None)` when no record has this id.
    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError>;

    /// Removing an absent id is a no-op.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Every record, in whatever order the store yields them.
    async fn scan(&self) -> Result<Vec<Product>, StoreError>;
}

/// Process-local store. Used by tests and by the server when no managed store is configured.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, Product>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("in-memory store lock poisoned".into())
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(product.product_id.clone(), product.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.remove(id);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Product>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().cloned().collect())
    }
}
