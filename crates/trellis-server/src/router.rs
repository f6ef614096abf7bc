use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Trellis routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::home_handler))
        .route("/health", get(handler::health_handler))
        .route("/handle/*rest", get(handler::handle_handler))
        .route("/communities/:id", get(handler::community_handler))
        .route("/communities/:id/edit", get(handler::community_edit_handler))
        .route("/collections/:id", get(handler::collection_handler))
        .route("/collections/:id/edit", get(handler::collection_edit_handler))
        .route("/items/:id", get(handler::item_handler))
        .route("/items/:id/edit", get(handler::item_edit_handler))
        .route("/bitstream/handle/*rest", get(handler::bitstream_handler))
        .fallback(handler::fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
