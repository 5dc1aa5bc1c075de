//! Handlers for link creation and lookup.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, CreateLinkResponse, LegacyCreateQuery, LinkResponse,
};
use crate::api::handlers::redirect::code_from_path;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "code": "52",
///   "short_url": "https://s.example.com/52",
///   "url": "https://example.com/page"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty or not an absolute URL.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create_short_url(&payload.url).await?;
    let short_url = state
        .link_service
        .get_short_url(&state.base_url, &link.code);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse::new(link, short_url)),
    ))
}

/// Returns the link behind a short code.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
pub async fn get_link_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let code = code_from_path(path)?;
    let link = state.link_service.get_link_by_code(&code).await?;

    Ok(Json(LinkResponse::new(link, code)))
}

/// Legacy create endpoint driven by query parameters.
///
/// # Endpoint
///
/// `GET /create?key=<secret>&url=<url>`
///
/// Responds with `Short url created /<code>` as plain text. The URL is stored
/// as given, without the format check applied by `POST /api/links`.
///
/// # Errors
///
/// Returns 401 if the key is missing or wrong, 400 if `url` is missing or empty.
pub async fn legacy_create_handler(
    State(state): State<AppState>,
    Query(query): Query<LegacyCreateQuery>,
) -> Result<String, AppError> {
    let key = query.key.ok_or_else(|| {
        AppError::unauthorized("Unauthorized", json!({ "reason": "No key provided" }))
    })?;
    state.auth_service.authenticate(&key)?;

    let url = query.url.ok_or_else(|| {
        AppError::bad_request("Missing url parameter", json!({ "field": "url" }))
    })?;

    let link = state.link_service.create_short_url(&url).await?;

    Ok(format!("Short url created /{}", link.code))
}
