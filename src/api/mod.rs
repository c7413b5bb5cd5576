//! HTTP API module - home page, roll endpoints and static assets

mod roll;

use std::path::Path;
use std::sync::Arc;

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::dice::DieSource;

/// Home page with the roll form
const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DieSource>,
}

/// Build the API router
pub fn router(source: Arc<dyn DieSource>, static_dir: &Path) -> Router {
    let state = AppState { source };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(roll::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Home page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
