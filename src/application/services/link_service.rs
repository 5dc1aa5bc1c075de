//! Short link creation and resolution service.

use std::sync::Arc;

use crate::domain::codec::ShortCodeCodec;
use crate::domain::entities::{Link, ShortenedLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::{debug, info};

/// Service tying the id-keyed store to the short-code codec.
///
/// Codes are never stored: the create path encodes the store's new row id, and
/// the resolve path decodes the code back into a row id before the lookup.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    codec: Arc<ShortCodeCodec>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, codec: Arc<ShortCodeCodec>) -> Self {
        Self {
            link_repository,
            codec,
        }
    }

    pub fn codec(&self) -> &ShortCodeCodec {
        &self.codec
    }

    /// Stores `url` and returns its new id and short code.
    ///
    /// The URL is stored as given; only empty input is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty, without touching the store.
    /// Returns [`AppError::Internal`] if the store fails or the id cannot be encoded.
    pub async fn create_short_url(&self, url: &str) -> Result<ShortenedLink, AppError> {
        if url.trim().is_empty() {
            return Err(AppError::bad_request(
                "Destination URL must not be empty",
                json!({ "field": "url" }),
            ));
        }

        let link = self.link_repository.insert(url).await?;
        let code = self.codec.encode_id(link.id)?;

        info!(id = link.id, code = %code, "Short link created");

        Ok(ShortenedLink {
            id: link.id,
            code,
            url: link.url,
        })
    }

    /// Resolves a short code to its stored link.
    ///
    /// Malformed codes, codes outside the alphabet, and codes whose id has no
    /// row all resolve to `Ok(None)`; the store is not queried for codes that
    /// do not decode.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only if the store fails.
    pub async fn resolve_short_url(&self, code: &str) -> Result<Option<Link>, AppError> {
        let Some(id) = self.codec.decode_id(code) else {
            debug!(code, "Short code does not decode");
            return Ok(None);
        };

        let link = self.link_repository.find_by_id(id).await?;

        if link.is_none() {
            debug!(code, id, "No link stored for decoded id");
        }

        Ok(link)
    }

    /// Like [`Self::resolve_short_url`], mapping absence to [`AppError::NotFound`].
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.resolve_short_url(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }

    /// Checks that the store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Constructs the full short URL from the public base URL and a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codec::CodecOptions;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn test_codec(min_length: usize) -> Arc<ShortCodeCodec> {
        Arc::new(
            ShortCodeCodec::new(CodecOptions {
                min_length,
                ..CodecOptions::default()
            })
            .unwrap(),
        )
    }

    fn create_test_link(id: i64, url: &str) -> Link {
        Link::new(id, url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_create_short_url_success() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_insert()
            .withf(|url| url == "https://example.com/page")
            .times(1)
            .returning(|url| Ok(create_test_link(1000, url)));

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(0));

        let shortened = service
            .create_short_url("https://example.com/page")
            .await
            .unwrap();

        assert_eq!(shortened.id, 1000);
        assert_eq!(shortened.code, "hei");
        assert_eq!(shortened.url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_create_short_url_respects_min_length() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_insert()
            .times(1)
            .returning(|url| Ok(create_test_link(0, url)));

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(8));

        let shortened = service.create_short_url("https://example.com").await.unwrap();

        assert_eq!(shortened.code, "tdffoing");
    }

    #[tokio::test]
    async fn test_create_short_url_rejects_empty_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(0));

        let result = service.create_short_url("   ").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_url_propagates_store_failure() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(0));

        let result = service.create_short_url("https://example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_short_url_found() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_id()
            .with(eq(1000))
            .times(1)
            .returning(|id| Ok(Some(create_test_link(id, "https://example.com/page"))));

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(0));

        let link = service.resolve_short_url("hei").await.unwrap().unwrap();

        assert_eq!(link.id, 1000);
        assert_eq!(link.url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_resolve_short_url_unknown_id() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(0));

        let result = service.resolve_short_url("hei").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_resolve_short_url_skips_store_for_foreign_characters() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_by_id().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(0));

        assert!(service.resolve_short_url("HEI").await.unwrap().is_none());
        assert!(service.resolve_short_url("he!").await.unwrap().is_none());
        assert!(service.resolve_short_url("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_short_url_skips_store_for_non_canonical_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_by_id().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(8));

        assert!(service.resolve_short_url("td").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_link_by_code_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_link_repo), test_codec(0));

        let result = service.get_link_by_code("hei").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_get_short_url_trims_trailing_slash() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()), test_codec(0));

        assert_eq!(
            service.get_short_url("https://s.example.com/", "hei"),
            "https://s.example.com/hei"
        );
        assert_eq!(
            service.get_short_url("https://s.example.com", "hei"),
            "https://s.example.com/hei"
        );
    }
}
