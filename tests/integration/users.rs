use crate::common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use warden::domain::auth::Claims;
use warden::domain::authorization::AccessPolicy;

async fn signed_up_token(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/v1/auth/signup",
            json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "pw1234"
            }),
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    body["data"]["attributes"]["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_get_account_hides_secrets() {
    let app = common::app(common::memory_state());
    let token = signed_up_token(&app).await;

    let response = app
        .oneshot(common::authed_request("GET", "/api/v1/users/me", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["type"], "users");
    assert_eq!(body["data"]["id"], "1");
    assert_eq!(body["data"]["attributes"]["username"], "alice");
    assert!(body["data"]["attributes"].get("password_hash").is_none());
    assert!(body["data"]["attributes"].get("refresh_token_hash").is_none());
}

#[tokio::test]
async fn test_account_requires_bearer_token() {
    let app = common::app(common::memory_state());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(common::authed_request(
            "GET",
            "/api/v1/users/me",
            "not-a-jwt",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_account() {
    let app = common::app(common::memory_state());
    let token = signed_up_token(&app).await;

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "PATCH",
            "/api/v1/users/me",
            &token,
            Some(json!({ "name": "Alice Liddell" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["attributes"]["name"], "Alice Liddell");
    assert_eq!(body["data"]["attributes"]["email"], "a@x.com");

    let response = app
        .oneshot(common::authed_request(
            "PATCH",
            "/api/v1/users/me",
            &token,
            Some(json!({ "name": null })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert!(body["data"]["attributes"]["name"].is_null());
}

#[tokio::test]
async fn test_delete_account() {
    let app = common::app(common::memory_state());
    let token = signed_up_token(&app).await;

    let response = app
        .clone()
        .oneshot(common::authed_request("DELETE", "/api/v1/users/me", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Access token outlives the account
    let response = app
        .oneshot(common::authed_request("GET", "/api/v1/users/me", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

struct DenyAll;

impl AccessPolicy for DenyAll {
    fn allows(&self, _claims: &Claims, _capability: &str) -> bool {
        false
    }
}

#[tokio::test]
async fn test_capability_denial_is_forbidden() {
    let state = common::memory_state().with_access_policy(Arc::new(DenyAll));
    let app = common::app(state);
    let token = signed_up_token(&app).await;

    let response = app
        .oneshot(common::authed_request("GET", "/api/v1/users/me", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::body_json(response).await;
    assert_eq!(body["errors"][0]["detail"], "Insufficient permissions");
}
