//! Shared application state for all routes. The store is constructed once and injected here.

use crate::store::ResourceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
    /// Rows per listing page; at least 1 (checked when settings are loaded).
    pub page_size: u64,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceStore>, page_size: u64) -> Self {
        assert!(page_size > 0, "page size must be at least 1");
        AppState { store, page_size }
    }
}
