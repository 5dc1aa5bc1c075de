mod common;

use serde_json::{Value, json};
use std::collections::HashSet;

async fn create(server: &axum_test::TestServer, url: &str) -> Value {
    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer())
        .json(&json!({ "url": url }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_created_code_resolves_to_same_url() {
    let (server, _repo) = common::create_test_server(1, 0);

    let created = create(&server, "https://example.com/page").await;
    let code = created["code"].as_str().unwrap();

    let response = server.get(&format!("/{}", code)).await;

    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/page");
}

#[tokio::test]
async fn test_never_issued_code_is_not_found() {
    let (server, _repo) = common::create_test_server(1, 0);
    create(&server, "https://example.com/page").await;

    // "75" is the code for id 2, which has not been allocated yet.
    server.get("/75").await.assert_status_not_found();
}

#[tokio::test]
async fn test_code_with_foreign_character_is_not_found() {
    let (server, _repo) = common::create_test_server(1000, 0);

    let created = create(&server, "https://example.com/page").await;
    let code = created["code"].as_str().unwrap();

    server
        .get(&format!("/{}-", code))
        .await
        .assert_status_not_found();
    server
        .get(&format!("/{}", code.to_uppercase()))
        .await
        .assert_status_not_found();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_resolvable_codes() {
    let (server, _repo) = common::create_test_server(1, 0);

    let (first, second) = tokio::join!(
        create(&server, "https://example.com/one"),
        create(&server, "https://example.com/two"),
    );

    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["code"], second["code"]);

    for created in [&first, &second] {
        let code = created["code"].as_str().unwrap();
        let response = server.get(&format!("/{}", code)).await;

        response.assert_status(axum::http::StatusCode::FOUND);
        assert_eq!(response.header("location"), created["url"].as_str().unwrap());
    }
}

#[tokio::test]
async fn test_many_creates_have_unique_codes() {
    let (server, _repo) = common::create_test_server(1, 0);

    let mut codes = HashSet::new();
    for i in 0..50 {
        let created = create(&server, &format!("https://example.com/{i}")).await;
        assert!(codes.insert(created["code"].as_str().unwrap().to_string()));
    }

    assert_eq!(codes.len(), 50);
}

#[tokio::test]
async fn test_id_zero_round_trips_with_padding() {
    let (server, _repo) = common::create_test_server(0, 8);

    let created = create(&server, "https://example.com/zero").await;

    assert_eq!(created["id"], 0);
    let code = created["code"].as_str().unwrap();
    assert!(code.len() >= 8);

    let response = server.get(&format!("/{}", code)).await;
    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/zero");
}
