//! Core operations: schema validation, pagination, and the resource service built on them.

pub mod pagination;
mod resource;
mod validation;
pub use pagination::{paginate, Page, PageWindow};
pub use resource::ResourceService;
pub use validation::SchemaValidator;
