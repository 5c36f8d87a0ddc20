//! Builds parameterized COUNT, SELECT, INSERT, UPDATE, DELETE for a resource kind.

use crate::schema::{Record, ResourceKind};
use crate::sql::{column, columns, PgBindValue};
use crate::store::StoreError;
use serde_json::Value;

/// Primary key column shared by every resource table.
pub const ID_COLUMN: &str = "id";

/// Quote identifier for PostgreSQL (safe: only from static column declarations).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub fn table_name(kind: ResourceKind) -> String {
    quoted(kind.path_segment())
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a parameter and return its placeholder with an explicit cast.
    fn push_param(&mut self, v: PgBindValue, pg_type: &str) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), pg_type)
    }
}

/// `id` followed by every data column, in declaration order.
fn select_column_list(kind: ResourceKind) -> String {
    std::iter::once(quoted(ID_COLUMN))
        .chain(columns(kind).iter().map(|c| quoted(c.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bind values for every data column; absent fields become typed NULLs.
/// Fails on the first value its column cannot hold.
pub fn column_values(kind: ResourceKind, record: &Record) -> Result<Vec<PgBindValue>, StoreError> {
    columns(kind)
        .iter()
        .map(|c| PgBindValue::for_column(c.name, c.ty, record.get(c.name).unwrap_or(&Value::Null)))
        .collect()
}

pub fn count(kind: ResourceKind) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", table_name(kind));
    q
}

/// SELECT one page ordered by id.
pub fn select_page(kind: ResourceKind, offset: u64, limit: u64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let limit_ph = q.push_param(PgBindValue::I64(limit), "bigint");
    let offset_ph = q.push_param(PgBindValue::I64(offset), "bigint");
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(kind),
        table_name(kind),
        quoted(ID_COLUMN),
        limit_ph,
        offset_ph
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(kind: ResourceKind, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(PgBindValue::I64(id), "bigint");
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(kind),
        table_name(kind),
        quoted(ID_COLUMN),
        ph
    );
    q
}

/// SELECT rows where a data column equals a value, ordered by id. Unknown columns are an error.
pub fn select_by_column(kind: ResourceKind, column_name: &str, value: &Value) -> Result<QueryBuf, StoreError> {
    let c = column(kind, column_name).ok_or_else(|| StoreError::InvalidValue {
        column: column_name.to_string(),
        reason: format!("no such column on {}", kind.path_segment()),
    })?;
    let mut q = QueryBuf::new();
    let ph = q.push_param(PgBindValue::for_column(c.name, c.ty, value)?, c.ty.pg_type());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {} ORDER BY {}",
        select_column_list(kind),
        table_name(kind),
        quoted(c.name),
        ph,
        quoted(ID_COLUMN)
    );
    Ok(q)
}

/// INSERT every data column; returns the generated id.
pub fn insert(kind: ResourceKind, record: &Record) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (c, v) in columns(kind).iter().zip(column_values(kind, record)?) {
        cols.push(quoted(c.name));
        placeholders.push(q.push_param(v, c.ty.pg_type()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table_name(kind),
        cols.join(", "),
        placeholders.join(", "),
        quoted(ID_COLUMN)
    );
    Ok(q)
}

/// UPDATE by id, replacing every data column.
pub fn update(kind: ResourceKind, id: i64, record: &Record) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (c, v) in columns(kind).iter().zip(column_values(kind, record)?) {
        let rhs = q.push_param(v, c.ty.pg_type());
        sets.push(format!("{} = {}", quoted(c.name), rhs));
    }
    let id_ph = q.push_param(PgBindValue::I64(id), "bigint");
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        table_name(kind),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_ph
    );
    Ok(q)
}

/// DELETE by id.
pub fn delete(kind: ResourceKind, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(PgBindValue::I64(id), "bigint");
    q.sql = format!("DELETE FROM {} WHERE {} = {}", table_name(kind), quoted(ID_COLUMN), ph);
    q
}

/// CREATE TABLE IF NOT EXISTS for a kind: bigserial id plus its data columns.
/// Required schema fields are NOT NULL.
pub fn create_table(kind: ResourceKind) -> String {
    let schema = kind.schema();
    let mut defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted(ID_COLUMN))];
    for c in columns(kind) {
        let not_null = if schema.rule(c.name).map(|r| r.required).unwrap_or(false) {
            " NOT NULL"
        } else {
            ""
        };
        defs.push(format!("{} {}{}", quoted(c.name), c.ty.pg_type().to_uppercase(), not_null));
    }
    format!("CREATE TABLE IF NOT EXISTS {} ({})", table_name(kind), defs.join(", "))
}
