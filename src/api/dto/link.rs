//! DTOs for link creation and lookup endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, ShortenedLink};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The destination URL (must be an absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Response for a newly created short link.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub url: String,
}

impl CreateLinkResponse {
    pub fn new(link: ShortenedLink, short_url: String) -> Self {
        Self {
            id: link.id,
            code: link.code,
            short_url,
            url: link.url,
        }
    }
}

/// Stored link looked up by its short code.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, code: String) -> Self {
        Self {
            id: link.id,
            code,
            url: link.url,
            created_at: link.created_at,
        }
    }
}

/// Query string of the legacy `GET /create` endpoint.
#[derive(Debug, Deserialize)]
pub struct LegacyCreateQuery {
    pub key: Option<String>,
    pub url: Option<String>,
}
