#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use short_url::domain::codec::{CodecOptions, ShortCodeCodec};
use short_url::domain::repositories::LinkRepository;
use short_url::infrastructure::persistence::InMemoryLinkRepository;
use short_url::routes::router;
use short_url::state::AppState;

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_BASE_URL: &str = "https://s.example.com";

pub fn bearer() -> String {
    format!("Bearer {}", TEST_SECRET)
}

pub fn create_test_codec(min_length: usize) -> ShortCodeCodec {
    ShortCodeCodec::new(CodecOptions {
        min_length,
        ..CodecOptions::default()
    })
    .unwrap()
}

/// State over a fresh in-memory store whose first id is `first_id`.
pub fn create_test_state(
    first_id: i64,
    min_length: usize,
) -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::starting_at(first_id));
    let link_repository: Arc<dyn LinkRepository> = repo.clone();

    let state = AppState::new(
        link_repository,
        create_test_codec(min_length),
        TEST_SECRET,
        TEST_BASE_URL,
    );

    (state, repo)
}

pub fn create_test_server(first_id: i64, min_length: usize) -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repo) = create_test_state(first_id, min_length);
    let server = TestServer::new(router(state)).unwrap();

    (server, repo)
}
