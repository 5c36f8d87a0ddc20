//! In-process store for tests and local runs. Rows are held per kind in id order.

use super::{ResourceStore, StoreError};
use crate::schema::{Record, ResourceKind};
use crate::sql::{self, PgBindValue};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Record>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<ResourceKind, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stored shape: `id` plus every column, absent ones as null. Values go through the same
/// column typing as the Postgres binds, so both stores accept and return identical rows.
fn to_row(kind: ResourceKind, id: i64, record: &Record) -> Result<Record, StoreError> {
    let mut row = Record::new();
    row.insert(sql::ID_COLUMN.into(), Value::from(id));
    for (c, v) in sql::columns(kind).iter().zip(sql::column_values(kind, record)?) {
        row.insert(c.name.to_string(), v.into_value());
    }
    Ok(row)
}

// Lock poisoning only follows a panic in another request; the data is still consistent.
fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn count(&self, kind: ResourceKind) -> Result<u64, StoreError> {
        let tables = read(&self.tables);
        Ok(tables.get(&kind).map(|t| t.rows.len() as u64).unwrap_or(0))
    }

    async fn fetch_page(&self, kind: ResourceKind, offset: u64, limit: u64) -> Result<Vec<Record>, StoreError> {
        let tables = read(&self.tables);
        let Some(table) = tables.get(&kind) else {
            return Ok(Vec::new());
        };
        Ok(table
            .rows
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn insert(&self, kind: ResourceKind, record: &Record) -> Result<i64, StoreError> {
        let mut tables = write(&self.tables);
        let table = tables.entry(kind).or_default();
        let id = table.last_id + 1;
        let row = to_row(kind, id, record)?;
        table.last_id = id;
        table.rows.insert(id, row);
        tracing::debug!(kind = %kind, id, "memory insert");
        Ok(id)
    }

    async fn update_by_id(&self, kind: ResourceKind, id: i64, record: &Record) -> Result<bool, StoreError> {
        let updated = to_row(kind, id, record)?;
        let mut tables = write(&self.tables);
        let Some(row) = tables.get_mut(&kind).and_then(|t| t.rows.get_mut(&id)) else {
            return Ok(false);
        };
        *row = updated;
        Ok(true)
    }

    async fn delete_by_id(&self, kind: ResourceKind, id: i64) -> Result<bool, StoreError> {
        let mut tables = write(&self.tables);
        Ok(tables
            .get_mut(&kind)
            .and_then(|t| t.rows.remove(&id))
            .is_some())
    }

    async fn fetch_by_id(&self, kind: ResourceKind, id: i64) -> Result<Option<Record>, StoreError> {
        let tables = read(&self.tables);
        Ok(tables.get(&kind).and_then(|t| t.rows.get(&id)).cloned())
    }

    async fn fetch_by_field(&self, kind: ResourceKind, field: &str, value: &Value) -> Result<Vec<Record>, StoreError> {
        let c = sql::column(kind, field).ok_or_else(|| StoreError::InvalidValue {
            column: field.to_string(),
            reason: format!("no such column on {}", kind.path_segment()),
        })?;
        let value = PgBindValue::for_column(c.name, c.ty, value)?.into_value();
        let tables = read(&self.tables);
        let Some(table) = tables.get(&kind) else {
            return Ok(Vec::new());
        };
        Ok(table
            .rows
            .values()
            .filter(|row| row.get(field) == Some(&value))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
