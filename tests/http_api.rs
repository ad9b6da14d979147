use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use product_api::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    app(AppState::in_memory(), 1024)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    send_bytes(router, method, uri, body.map(|b| b.as_bytes().to_vec())).await
}

async fn send_bytes(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Vec<u8>>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(b) = &body {
        builder = builder
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, b.len());
    }
    let req = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn crud_over_http() {
    let router = router();
    let (status, created) = send(
        &router,
        Method::POST,
        "/products",
        Some(r#"{"name":"Pen","description":"Blue pen","price":1.5,"available":true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["productID"].as_str().unwrap().to_string();
    let path = format!("/products/{}", id);

    let (status, fetched) = send(&router, Method::GET, &path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &router,
        Method::PUT,
        &path,
        Some(r#"{"name":"Pen","description":"Red pen","price":2,"available":false}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Red pen");
    assert_eq!(updated["productID"], id.as_str());

    let (status, list) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([updated]));

    let (status, body) = send(&router, Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&router, Method::GET, &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Product not found" }));
}

#[tokio::test]
async fn malformed_json_is_classified_not_rejected_by_extractor() {
    let router = router();
    let (status, body) = send(&router, Method::POST, "/products", Some("{\"name\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body format: "));
}

#[tokio::test]
async fn missing_body_on_create_is_400() {
    let router = router();
    let (status, body) = send(&router, Method::POST, "/products", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid request body format: missing request body" }));
}

#[tokio::test]
async fn put_unknown_id_is_404() {
    let router = router();
    let (status, _) = send(
        &router,
        Method::PUT,
        "/products/unknown",
        Some(r#"{"name":"Pen","description":"Blue pen","price":1.5,"available":true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn put_unknown_id_with_undecodable_body_is_404() {
    let router = router();
    let (status, body) = send_bytes(&router, Method::PUT, "/products/unknown", Some(vec![0xff, 0xfe])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Product not found" }));
}

#[tokio::test]
async fn undecodable_body_on_existing_record_is_400() {
    let router = router();
    let (_, created) = send(
        &router,
        Method::POST,
        "/products",
        Some(r#"{"name":"Pen","description":"Blue pen","price":1.5,"available":true}"#),
    )
    .await;
    let path = format!("/products/{}", created["productID"].as_str().unwrap());
    let (status, body) = send_bytes(&router, Method::PUT, &path, Some(vec![0xff, 0xfe])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body format: "));

    let (status, body) = send_bytes(&router, Method::POST, "/products", Some(vec![0xff, 0xfe])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn oversized_body_is_413() {
    let router = router();
    let big = format!(r#"{{"name":"{}"}}"#, "x".repeat(4096));
    let (status, _) = send(&router, Method::POST, "/products", Some(&big)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_and_version() {
    let router = router();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "product-api");
    let (status, body) = send(&router, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "service": "product-api", "version": env!("CARGO_PKG_VERSION") })
    );
}
