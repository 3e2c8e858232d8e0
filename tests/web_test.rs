use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use module_hub::config::HubConfig;
use module_hub::lifecycle::HubSystem;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn demo_router() -> Router {
    let config = HubConfig {
        base_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos"),
        ..HubConfig::default()
    };
    HubSystem::start(config).await.unwrap().router()
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_module_status() {
    let (status, body) = send(demo_router().await, "GET", "/api/modules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["total_modules"], json!(3));

    let (status, body) = send(demo_router().await, "GET", "/api/modules/module-c", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["module"]["route_prefix"], json!("/api/module-c"));

    let (status, body) = send(demo_router().await, "GET", "/api/modules/module-z", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("module not found"));
}

#[tokio::test]
async fn test_reload_endpoint() {
    let (status, body) = send(demo_router().await, "POST", "/api/modules/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["loaded_modules"], json!(3));
}

#[tokio::test]
async fn test_proxy_dispatch() {
    let (status, body) = send(demo_router().await, "POST", "/api/proxy/order/pay-order/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("paid"));

    let (status, body) = send(
        demo_router().await,
        "GET",
        "/api/proxy/product/products?category=laptop",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        demo_router().await,
        "POST",
        "/api/proxy/user/create?name=query",
        Some(json!({"name": "Body Name", "email": "b@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Body Name"));
}

#[tokio::test]
async fn test_proxy_errors() {
    let (status, body) = send(demo_router().await, "GET", "/api/proxy/user/user/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("invalid id"));

    let (status, _) = send(demo_router().await, "GET", "/api/proxy/invoice/list", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_still_get_envelopes() {
    // Invalid UTF-8 in a path parameter fails extraction.
    let (status, body) = send(demo_router().await, "GET", "/api/proxy/user/user/%ff", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(400));
    assert!(body["timestamp"].is_i64());

    let (status, body) = send(demo_router().await, "GET", "/api/proxy/user/users?a=%ff&b", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, body) = send(demo_router().await, "GET", "/api/module-a/users?a=%ff&b&=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn test_disabled_domain_is_rejected() {
    let config = HubConfig {
        base_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos"),
        bindings: module_hub::config::DomainBindings {
            product: "module-missing".to_string(),
            ..Default::default()
        },
        ..HubConfig::default()
    };
    let router = HubSystem::start(config).await.unwrap().router();
    let (status, body) = send(router, "GET", "/api/proxy/product/products", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("module-missing is not enabled"));
}

#[tokio::test]
async fn test_module_routes_and_fallback() {
    let (status, body) = send(demo_router().await, "GET", "/api/module-b/products/1/stock?quantity=50", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available"], json!(true));

    let (status, body) = send(demo_router().await, "GET", "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let (status, body) = send(demo_router().await, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_modules_overview() {
    let (_, body) = send(demo_router().await, "GET", "/api/proxy/modules", None).await;
    assert_eq!(body["data"]["total"], json!(3));
    assert_eq!(body["data"]["mock_mode"], json!(true));
    assert_eq!(body["data"]["modules"]["module-a"]["developer"], json!("Developer A"));
}
