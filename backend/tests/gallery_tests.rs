mod common;

use common::*;

use std::time::Duration;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_gallery_empty() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/api/v1/gallery")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body, json!({ "ok": true, "gallery": [] }));
}

#[tokio::test]
async fn test_gallery_lists_every_upload() {
    let setup = TestSetup::new();

    let mut uploaded = Vec::new();
    for name in ["one.png", "two.jpg", "three.gif"] {
        let body = setup.upload(name, "image/png", &png_bytes(64)).await;
        uploaded.push(body["url"].as_str().unwrap().to_string());
    }

    let response = setup
        .send_get_request("/api/v1/gallery")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["ok"], json!(true));

    let mut gallery: Vec<String> = serde_json::from_value(body["gallery"].clone()).unwrap();
    assert_eq!(gallery.len(), uploaded.len());

    gallery.sort();
    uploaded.sort();
    assert_eq!(gallery, uploaded);
}

#[tokio::test]
async fn test_gallery_storage_failure() {
    let setup = TestSetup::new();
    setup.blob_store.set_unavailable(true);

    let response = setup
        .send_get_request("/api/v1/gallery")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].is_string());
    assert!(body.get("gallery").is_none());
}

#[tokio::test]
async fn test_gallery_slow_storage_completes() {
    let setup = TestSetup::new();
    let uploaded = setup.upload("fly.png", "image/png", &png_bytes(64)).await;
    setup.blob_store.set_latency(Duration::from_millis(1500));

    let response = setup
        .send_get_request("/api/v1/gallery")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body, json!({ "ok": true, "gallery": [uploaded["url"]] }));
}
