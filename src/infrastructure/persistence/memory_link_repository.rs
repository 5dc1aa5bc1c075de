//! In-memory implementation of the link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local link store backed by a [`DashMap`].
///
/// Ids come from an atomic counter, so concurrent inserts always receive
/// distinct ids. Contents are lost when the process exits.
#[derive(Debug)]
pub struct InMemoryLinkRepository {
    storage: DashMap<i64, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    /// Creates an empty store whose first id is `1`, like a `BIGSERIAL` column.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates an empty store whose first allocated id is `first_id`.
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(first_id),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, url: &str) -> Result<Link, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let link = Link::new(id, url.to_string(), Utc::now());

        self.storage.insert(id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.storage.get(&id).map(|entry| entry.value().clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
