// src/routes/mod.rs
pub mod example;

use std::path::Path;

use crate::state::SharedState;
use axum::{Router, routing::get};
use example::{example_handler, get_messages_handler, get_metrics_handler, index_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/example", get(example_handler))
        .route("/messages", get(get_messages_handler))
        .route("/metrics", get(get_metrics_handler))
        .route("/health", get(|| async { "OK" }))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}
