//! Shared application state and router setup for the HTTP surface.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::pipeline::Pipeline;

pub struct AppState {
    pub pipeline: Pipeline,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/generate", post(handlers::generate))
        .route("/state", get(handlers::pipeline_state))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
