//! Handlers for the root banner and favicon.

use axum::http::StatusCode;

/// `GET /` - plain-text service banner.
pub async fn index_handler() -> &'static str {
    "url shortener"
}

/// `GET /favicon.ico` - answered directly so it never reaches the code lookup.
pub async fn favicon_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
