use crate::common::{http_service, mount_page, product_page, url};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use shelf_scout::config::ServerConfig;
use shelf_scout::server::router;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;

fn app() -> Router {
    router(http_service(), &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_unknown_job_is_not_found() {
    let app = app();

    let (status, body) = send(&app, get("/crawler/jobs/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Job not found"}));

    let (status, _) = send(&app, get("/crawler/jobs/nope/items")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_and_poll() {
    let shop = MockServer::start().await;
    mount_page(&shop, "/p/1", product_page("one", "5.00")).await;

    let app = app();
    let submission = json!({
        "sources": [{
            "name": "shop",
            "product_pages": [url(&shop, "/p/1").to_string()],
            "product": {"title": "h1.title", "price": ".price"}
        }],
        "concurrency": 2
    });

    let (status, body) = send(&app, post_json("/crawler/jobs", &submission)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "queued");
    assert_eq!(body["count"], 0);
    assert!(body["error"].is_null());

    let id = body["id"].as_str().unwrap().to_string();
    let mut view = Value::Null;
    for _ in 0..100 {
        let (_, polled) = send(&app, get(&format!("/crawler/jobs/{}", id))).await;
        view = polled;
        if view["status"] == "completed" || view["status"] == "failed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(view, json!({"id": id, "status": "completed", "count": 1, "error": null}));

    let (status, items) = send(&app, get(&format!("/crawler/jobs/{}/items", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items["meta"], json!({"count": 1}));
    assert_eq!(items["items"][0]["title"], "one");
    assert_eq!(items["items"][0]["price"], 5.0);
    assert!(items["items"][0]["sku"].is_null());
}

#[tokio::test]
async fn test_invalid_submission_rejected() {
    let app = app();
    let submission = json!({
        "sources": [{"name": "", "product": {}}]
    });

    let (status, body) = send(&app, post_json("/crawler/jobs", &submission)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "source #0: name must not be empty");
}

#[tokio::test]
async fn test_malformed_url_rejected() {
    let app = app();
    let submission = json!({
        "sources": [{"name": "shop", "list_pages": ["not a url"], "product": {}}]
    });

    let (status, body) = send(&app, post_json("/crawler/jobs", &submission)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}
