pub mod config;
pub mod routes;

use std::{path::Path, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use roleta_core::EngineParams;

#[derive(Clone)]
pub struct AppState {
    pub params: Arc<EngineParams>,
}

impl AppState {
    pub fn new(params: EngineParams) -> Self {
        Self {
            params: Arc::new(params),
        }
    }
}

/// `/spin` and `/health`, plus the front-end served from `static_dir`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/spin", post(routes::route_spin))
        .route("/health", get(routes::route_health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
