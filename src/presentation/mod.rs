// Presentation layer - HTTP routing
pub mod app_state;
pub mod errors;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    compare_farms, get_dashboard, health_check, list_farms, stream_dashboard,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Bodies are compressed in the response builders, so no CompressionLayer here
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/farms", get(list_farms))
        .route("/farms/:name/dashboard", get(get_dashboard))
        .route("/farms/:name/stream", get(stream_dashboard))
        .route("/compare", get(compare_farms))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
