// Remote catalog tests against a mock HTTP server

use campus_match::services::{CatalogCache, FailureKind, RemoteCatalog, RetryPolicy, SchoolCatalog};

const SCHOOLS_JSON: &str = r#"[
    {"id": 1, "name": "Harvard Business School", "ranking": 1, "tuitionFee": 73440, "currency": "USD"},
    {"id": 5, "name": "INSEAD", "ranking": 5, "tuitionFee": "89,000", "currency": "EUR"}
]"#;

fn remote(url: String, api_key: Option<&str>) -> RemoteCatalog {
    RemoteCatalog::new(url, api_key.map(str::to_string), 5, RetryPolicy::new(3, 1, 5)).unwrap()
}

#[tokio::test]
async fn test_remote_catalog_parses_array() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/schools")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SCHOOLS_JSON)
        .create_async()
        .await;

    let catalog = remote(format!("{}/schools", server.url()), Some("secret"));
    let schools = catalog.list_all().await.unwrap();

    mock.assert_async().await;
    assert_eq!(schools.len(), 2);
    assert_eq!(schools[1].fee(), Some(89_000.0));
}

#[tokio::test]
async fn test_remote_catalog_parses_documents_envelope() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/documents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total": 1, "documents": [{"$id": "x1", "data": {"id": 4, "name": "London Business School", "currency": "GBP"}}]}"#)
        .create_async()
        .await;

    let schools = remote(format!("{}/documents", server.url()), None)
        .list_all()
        .await
        .unwrap();

    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].currency, "GBP");
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/schools")
        .with_status(503)
        .with_body("unavailable")
        .expect(3)
        .create_async()
        .await;

    let err = remote(format!("{}/schools", server.url()), None)
        .list_all()
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.kind(), FailureKind::Api);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/schools")
        .with_status(404)
        .with_body("not found")
        .expect(1)
        .create_async()
        .await;

    let err = remote(format!("{}/schools", server.url()), None)
        .list_all()
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.kind(), FailureKind::Api);
}

#[tokio::test]
async fn test_malformed_payload_is_data_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/schools")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .expect(1)
        .create_async()
        .await;

    let err = remote(format!("{}/schools", server.url()), None)
        .list_all()
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.kind(), FailureKind::Data);
}

#[tokio::test]
async fn test_concurrent_misses_share_one_fetch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/schools")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SCHOOLS_JSON)
        .expect(1)
        .create_async()
        .await;

    let catalog = SchoolCatalog::Remote(remote(format!("{}/schools", server.url()), None));
    let cache = CatalogCache::new(60);

    let (first, second, third) = tokio::join!(
        cache.get_or_load(&catalog),
        cache.get_or_load(&catalog),
        cache.get_or_load(&catalog)
    );

    assert_eq!(first.unwrap().len(), 2);
    assert_eq!(second.unwrap().len(), 2);
    assert_eq!(third.unwrap().len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_loose_remote_records_are_kept() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/schools")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[
            {"id": 1, "name": "A", "location": null, "ranking": 3},
            {"id": 2, "name": "B", "ranking": "N/A"},
            {"id": 3, "name": "C", "specializations": null},
            {"id": 4, "name": "D", "currency": null}
        ]"#)
        .create_async()
        .await;

    let schools = remote(format!("{}/schools", server.url()), None)
        .list_all()
        .await
        .unwrap();

    let ids: Vec<u32> = schools.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(schools[3].currency, "USD");
}

#[tokio::test]
async fn test_cache_serves_snapshot_until_invalidated() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/schools")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SCHOOLS_JSON)
        .expect(2)
        .create_async()
        .await;

    let catalog = SchoolCatalog::Remote(remote(format!("{}/schools", server.url()), None));
    let cache = CatalogCache::new(60);

    assert_eq!(cache.get_or_load(&catalog).await.unwrap().len(), 2);
    assert_eq!(cache.get_or_load(&catalog).await.unwrap().len(), 2);

    cache.invalidate(&catalog).await;
    assert_eq!(cache.get_or_load(&catalog).await.unwrap().len(), 2);

    mock.assert_async().await;
}
