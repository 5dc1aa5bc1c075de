//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::codec::ShortCodeCodec;
use crate::domain::repositories::LinkRepository;

/// State shared by every request handler.
///
/// Cloning is cheap: services are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService>,
    /// Public prefix for `short_url` values, without trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Wires services around a link store and a configured codec.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        codec: ShortCodeCodec,
        secret_key: &str,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            link_service: Arc::new(LinkService::new(link_repository, Arc::new(codec))),
            auth_service: Arc::new(AuthService::new(secret_key)),
            base_url,
        }
    }
}
