//! Resource operations: validation and pagination applied around the store.

use crate::error::AppError;
use crate::schema::{Record, ResourceKind, PARENT_BUSINESS_FIELD};
use crate::service::pagination::{paginate, Page};
use crate::service::SchemaValidator;
use crate::store::ResourceStore;
use serde_json::Value;

pub struct ResourceService;

impl ResourceService {
    /// One page of `kind`, ordered by id. `requested_page` is clamped into range.
    pub async fn list(
        store: &dyn ResourceStore,
        kind: ResourceKind,
        requested_page: i64,
        page_size: u64,
    ) -> Result<Page, AppError> {
        let count = store.count(kind).await?;
        let window = paginate(requested_page, count, page_size);
        tracing::debug!(kind = %kind, requested_page, page = window.page, offset = window.offset, count, "list");
        let items = store.fetch_page(kind, window.offset, window.page_size).await?;
        Ok(Page::new(items, window))
    }

    /// Validate, keep only schema fields, insert. Returns the generated id and the stored fields.
    pub async fn create(store: &dyn ResourceStore, kind: ResourceKind, body: &Record) -> Result<(i64, Record), AppError> {
        let schema = kind.schema();
        if !SchemaValidator::validate(body, schema) {
            return Err(AppError::SchemaInvalid(kind));
        }
        let record = SchemaValidator::extract(body, schema);
        let id = store.insert(kind, &record).await?;
        tracing::info!(kind = %kind, id, "created");
        Ok((id, record))
    }

    pub async fn read(store: &dyn ResourceStore, kind: ResourceKind, id: i64) -> Result<Record, AppError> {
        store
            .fetch_by_id(kind, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", kind, id)))
    }

    /// A business with its reviews and photos embedded; other kinds as stored.
    pub async fn read_expanded(store: &dyn ResourceStore, kind: ResourceKind, id: i64) -> Result<Record, AppError> {
        let mut record = Self::read(store, kind, id).await?;
        if kind == ResourceKind::Business {
            let business_id = Value::from(id);
            for child in [ResourceKind::Review, ResourceKind::Photo] {
                let rows = store.fetch_by_field(child, PARENT_BUSINESS_FIELD, &business_id).await?;
                record.insert(
                    child.path_segment().to_string(),
                    Value::Array(rows.into_iter().map(Value::Object).collect()),
                );
            }
        }
        Ok(record)
    }

    /// Full replacement. Owner-identifying fields must match the stored record.
    pub async fn replace(
        store: &dyn ResourceStore,
        kind: ResourceKind,
        id: i64,
        body: &Record,
    ) -> Result<Record, AppError> {
        let schema = kind.schema();
        if !SchemaValidator::validate(body, schema) {
            return Err(AppError::SchemaInvalid(kind));
        }
        let updated = SchemaValidator::extract(body, schema);
        let existing = Self::read(store, kind, id).await?;
        if let Some(field) = SchemaValidator::changed_owner_field(&existing, &updated, kind.owner_fields()) {
            tracing::warn!(kind = %kind, id, field, "rejected owner field change");
            return Err(AppError::ImmutableField {
                kind,
                field: field.to_string(),
            });
        }
        if !store.update_by_id(kind, id, &updated).await? {
            return Err(AppError::NotFound(format!("{} {}", kind, id)));
        }
        tracing::info!(kind = %kind, id, "replaced");
        Ok(updated)
    }

    pub async fn delete(store: &dyn ResourceStore, kind: ResourceKind, id: i64) -> Result<(), AppError> {
        if !store.delete_by_id(kind, id).await? {
            return Err(AppError::NotFound(format!("{} {}", kind, id)));
        }
        tracing::info!(kind = %kind, id, "deleted");
        Ok(())
    }
}
