#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for request body size limits in front of the Negotiate gate

use std::sync::Arc;

use api_gateway::{ApiGateway, ApiGatewayConfig};
use authn_sdk::SecurityRealm;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::post,
};
use static_realm_plugin::{StaticRealm, StaticRealmConfig};
use tower::ServiceExt;

async fn echo_len(body: String) -> String {
    body.len().to_string()
}

fn app_with_body_limit(limit_bytes: usize) -> Router {
    let mut config = ApiGatewayConfig::default();
    config.defaults.body_limit_bytes = limit_bytes;

    let realm: Arc<dyn SecurityRealm> =
        Arc::new(StaticRealm::from_config(&StaticRealmConfig::default()).unwrap());

    ApiGateway::new(config, Some(realm))
        .build_router(Router::new().route("/api/jobs", post(echo_len)))
        .unwrap()
}

fn post_with_len(len: usize) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header(header::AUTHORIZATION, "Negotiate YIIB")
        .header(header::CONTENT_LENGTH, len)
        .body(Body::from(vec![b'a'; len]))
        .unwrap()
}

#[tokio::test]
async fn body_within_limit_is_accepted() {
    let response = app_with_body_limit(1024)
        .oneshot(post_with_len(512))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn body_over_limit_is_rejected() {
    let response = app_with_body_limit(1024)
        .oneshot(post_with_len(4096))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
