//! Integration tests for loading the catalog over HTTP

mod common;

use common::{closed_url, serve_once};
use routinechat::catalog::{CatalogLoader, CatalogSource, LoadError};

const CATALOG: &str = r#"{"products": [
    {"id": 1, "name": "Aloe Gel", "brand": "Leaf", "category": "skincare", "image": "img/aloe.jpg", "description": "Soothing gel"},
    {"id": "sh-2", "name": "Volume Shampoo", "brand": "Mane", "category": "haircare", "image": "img/shampoo.jpg", "description": "Lift for fine hair"}
]}"#;

#[tokio::test]
async fn test_load_from_url() {
    let (url, server) = serve_once("200 OK", CATALOG).await;

    let loader = CatalogLoader::new(CatalogSource::parse(&url));
    let products = loader.load_products().await.expect("load failed");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Aloe Gel");
    assert_eq!(products[1].id.as_str(), "sh-2");

    let raw = server.await.expect("server panicked");
    assert!(raw.starts_with("GET / HTTP/1.1"));
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let (url, server) = serve_once("404 Not Found", r#"{"error": "missing"}"#).await;

    let err = CatalogLoader::new(CatalogSource::parse(&url))
        .load_products()
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Status { status: 404 }));
    let _ = server.await;
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let err = CatalogLoader::new(CatalogSource::parse(&closed_url().await))
        .load_products()
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Http(_)));
}

#[tokio::test]
async fn test_malformed_remote_document_is_parse_error() {
    let (url, server) = serve_once("200 OK", "<html>not a catalog</html>").await;

    let err = CatalogLoader::new(CatalogSource::parse(&url))
        .load_products()
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
    let _ = server.await;
}
