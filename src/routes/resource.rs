//! Resource routes. Parameterized paths so handlers resolve the kind from the segment.

use crate::handlers::resource::{create, delete as delete_handler, list, read, replace};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", get(list).post(create))
        .route(
            "/:path_segment/:id",
            get(read).put(replace).delete(delete_handler),
        )
        .with_state(state)
}
