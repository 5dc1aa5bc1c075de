//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Service banner (public)
//! - `GET  /favicon.ico` - Always 404 so browsers never hit the code lookup
//! - `GET  /health`      - Health check: store and codec (public)
//! - `GET  /create`      - Legacy create with `?key=&url=` (public, key checked in handler)
//! - `GET  /{code}`      - Short link redirect (public)
//! - `/api/*`            - REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token checked against `SECRET_KEY`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    favicon_handler, health_handler, index_handler, legacy_create_handler, redirect_handler,
};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and middleware without path normalization.
///
/// Static routes are registered next to `/{code}`; axum prefers them over the
/// capture, so `/health` and `/create` never reach the code lookup.
pub fn router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/", get(index_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/health", get(health_handler))
        .route("/create", get(legacy_create_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
