//! Directory API: schema-validated, paginated resources (businesses, reviews, photos) over a row store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreBackend};
pub use error::{AppError, ConfigError};
pub use migration::ensure_resource_tables;
pub use routes::{app, common_routes, resource_routes};
pub use schema::{FieldRule, FieldSchema, Record, ResourceKind};
pub use service::{paginate, Page, PageWindow, ResourceService, SchemaValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgResourceStore, ResourceStore, StoreError};
