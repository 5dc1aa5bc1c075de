//! Link entity representing a stored destination URL.

use chrono::{DateTime, Utc};

/// A stored destination URL keyed by its row id.
///
/// The short code is never stored; it is derived from `id` by
/// [`crate::domain::codec::ShortCodeCodec`] whenever it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            created_at,
        }
    }
}

/// Result of the create path: the new row id and its public code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub id: i64,
    pub code: String,
    pub url: String,
}
