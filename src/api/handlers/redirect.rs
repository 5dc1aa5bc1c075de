//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Decode the code into a link id (no store access for malformed codes)
/// 2. Look up the link by id
/// 3. Return `302 Found` with the stored URL in `Location`
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed (including segments that are
/// not valid UTF-8 once percent-decoded) or no link has its id.
/// Returns 500 if the store fails or the stored URL is not a valid header value.
pub async fn redirect_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let code = code_from_path(path)?;
    let link = state.link_service.get_link_by_code(&code).await?;

    let location = HeaderValue::from_str(&link.url).map_err(|_| {
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "id": link.id }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Extracts the `{code}` segment; a segment axum cannot decode is an unknown code.
pub(crate) fn code_from_path(
    path: Result<Path<String>, PathRejection>,
) -> Result<String, AppError> {
    path.map(|Path(code)| code).map_err(|rejection| {
        tracing::debug!(%rejection, "Undecodable short code segment");
        AppError::not_found("Short link not found", json!({}))
    })
}
