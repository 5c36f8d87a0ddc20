//! Resource store contract: count-and-range retrieval plus single-record writes, keyed by `id`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgResourceStore};

use crate::schema::{Record, ResourceKind};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid value for {column}: {reason}")]
    InvalidValue { column: String, reason: String },
}

/// Row-oriented backing store. Returned records always carry their `id`.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn count(&self, kind: ResourceKind) -> Result<u64, StoreError>;

    /// Records ordered by `id`, skipping `offset` and returning at most `limit`.
    async fn fetch_page(&self, kind: ResourceKind, offset: u64, limit: u64) -> Result<Vec<Record>, StoreError>;

    /// Insert and return the generated id.
    async fn insert(&self, kind: ResourceKind, record: &Record) -> Result<i64, StoreError>;

    /// Replace every schema field of the record. `Ok(false)` when no row has this id.
    async fn update_by_id(&self, kind: ResourceKind, id: i64, record: &Record) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, kind: ResourceKind, id: i64) -> Result<bool, StoreError>;

    async fn fetch_by_id(&self, kind: ResourceKind, id: i64) -> Result<Option<Record>, StoreError>;

    /// Records whose `field` equals `value`, ordered by `id`.
    async fn fetch_by_field(&self, kind: ResourceKind, field: &str, value: &Value) -> Result<Vec<Record>, StoreError>;

    /// Cheap round trip used by `/ready`.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Backend name reported by `/ready`.
    fn name(&self) -> &'static str;
}
