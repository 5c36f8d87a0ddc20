//! HTTP handlers for resource CRUD and listing.

pub mod resource;
pub use resource::*;
