//! Resource table bootstrap. Idempotent; safe to run on every start.

use crate::schema::ResourceKind;
use crate::sql::create_table;
use crate::store::StoreError;
use sqlx::PgPool;

/// CREATE TABLE IF NOT EXISTS for every resource kind.
pub async fn ensure_resource_tables(pool: &PgPool) -> Result<(), StoreError> {
    for kind in ResourceKind::ALL {
        let ddl = create_table(kind);
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(tables = ResourceKind::ALL.len(), "resource tables ready");
    Ok(())
}
