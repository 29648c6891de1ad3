mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;

/// Collection names shared by the repositories.
pub mod collections {
    pub const CATEGORIES: &str = "categories";
    pub const BULL_PAIRS: &str = "bull_pairs";
    pub const RACES: &str = "races";
    pub const RACE_ENTRIES: &str = "race_entries";
    pub const LAPS: &str = "laps";
}

/// Document store port. Backends hold JSON documents in named collections
/// keyed by id and support equality queries over one top-level field.
///
/// No transactions are assumed; multi-document operations above this trait
/// are sequential and best-effort.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Value>>;

    /// All documents where `doc[field] == value`.
    async fn query(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<Value>>;

    async fn put(&self, collection: &str, id: Uuid, doc: Value) -> Result<()>;

    /// Returns whether a document was removed.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool>;

    async fn list_all(&self, collection: &str) -> Result<Vec<Value>>;
}
