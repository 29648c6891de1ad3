pub mod dto;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

use std::sync::Arc;

use crate::store::{DocumentStore, MemoryStore};

/// Shared handle to the document store backing every repository. Cheap to
/// clone; one per process.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
