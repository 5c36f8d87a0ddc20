//! PostgreSQL store: parameterized queries from the SQL builder, rows returned as JSON records.

use super::{ResourceStore, StoreError};
use crate::schema::{Record, ResourceKind};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        PgResourceStore { pool }
    }

    fn bind(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<Record>, StoreError> {
        let rows = Self::bind(q).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_record).collect())
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn count(&self, kind: ResourceKind) -> Result<u64, StoreError> {
        let q = sql::count(kind);
        tracing::debug!(sql = %q.sql, "query");
        let (n,): (i64,) = sqlx::query_as(&q.sql).fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn fetch_page(&self, kind: ResourceKind, offset: u64, limit: u64) -> Result<Vec<Record>, StoreError> {
        self.query_many(&sql::select_page(kind, offset, limit)).await
    }

    async fn insert(&self, kind: ResourceKind, record: &Record) -> Result<i64, StoreError> {
        use sqlx::Row;
        let q = sql::insert(kind, record)?;
        let row = Self::bind(&q).fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(sql::ID_COLUMN)?)
    }

    async fn update_by_id(&self, kind: ResourceKind, id: i64, record: &Record) -> Result<bool, StoreError> {
        let q = sql::update(kind, id, record)?;
        let result = Self::bind(&q).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, kind: ResourceKind, id: i64) -> Result<bool, StoreError> {
        let q = sql::delete(kind, id);
        let result = Self::bind(&q).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_by_id(&self, kind: ResourceKind, id: i64) -> Result<Option<Record>, StoreError> {
        let q = sql::select_by_id(kind, id);
        let row = Self::bind(&q).fetch_optional(&self.pool).await?;
        Ok(row.map(|r| row_to_record(&r)))
    }

    async fn fetch_by_field(&self, kind: ResourceKind, field: &str, value: &Value) -> Result<Vec<Record>, StoreError> {
        self.query_many(&sql::select_by_column(kind, field, value)?).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

fn row_to_record(row: &PgRow) -> Record {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = Record::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}

/// Create the database named in `database_url` if it does not exist (connects to `postgres` to do so).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin_url, db_name)) = parse_db_name_from_url(database_url) else {
        return Ok(());
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Option<(String, String)> {
    let path_start = url.rfind('/')? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Some((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
