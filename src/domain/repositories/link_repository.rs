//! Repository trait for the id-keyed link store.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Store of destination URLs keyed by an auto-incrementing row id.
///
/// The store owns id allocation: every successful [`insert`](Self::insert)
/// returns an id that was never issued before, even under concurrent calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores `url` under a freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn insert(&self, url: &str) -> Result<Link, AppError>;

    /// Finds a link by its row id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
