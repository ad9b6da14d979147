//! Collaborators shared by every request. Holds no per-request state.

use crate::id::{IdGenerator, UuidGenerator};
use crate::store::{InMemoryStore, ProductStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }
}
