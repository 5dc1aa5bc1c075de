//! Shared-secret guard for the `/api` routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Lets a request through only when its Bearer token equals `SECRET_KEY`.
///
/// ```text
/// Authorization: Bearer <SECRET_KEY>
/// ```
///
/// A missing or non-Bearer `Authorization` header and a wrong secret both
/// end in `401 Unauthorized` with `WWW-Authenticate: Bearer`. The comparison
/// itself lives in [`crate::application::services::AuthService`].
pub async fn layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();

    let secret = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(secret)) => secret,
        Err(_) => {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Missing Bearer secret" }),
            ));
        }
    };

    state.auth_service.authenticate(&secret)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}
