use crate::common;

use axum::{Router, http::StatusCode};
use serde_json::{Value, json};
use serial_test::serial;
use tower::ServiceExt;

async fn signup(app: &Router, username: &str, email: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/v1/auth/signup",
            json!({
                "username": username,
                "email": email,
                "password": "pw1234",
                "name": "Test User"
            }),
        ))
        .await
        .unwrap();

    let status = response.status();
    (status, common::body_json(response).await)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(common::json_request("POST", uri, body))
        .await
        .unwrap();

    let status = response.status();
    (status, common::body_json(response).await)
}

fn tokens(body: &Value) -> (String, String) {
    let attributes = &body["data"]["attributes"];
    (
        attributes["access_token"].as_str().unwrap().to_string(),
        attributes["refresh_token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_signup_returns_token_resource() {
    let app = common::app(common::memory_state());

    let (status, body) = signup(&app, "alice", "a@x.com").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "auth-tokens");
    assert_eq!(body["data"]["attributes"]["token_type"], "Bearer");
    assert_eq!(body["data"]["attributes"]["expires_in"], 900);
    let (access, refresh) = tokens(&body);
    assert_ne!(access, refresh);
}

#[tokio::test]
async fn test_signup_duplicate_username_and_email() {
    let app = common::app(common::memory_state());
    signup(&app, "alice", "a@x.com").await;

    let (status, body) = signup(&app, "alice", "other@x.com").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["detail"], "Username already taken");

    let (status, body) = signup(&app, "bob", "a@x.com").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["detail"], "Email address is already taken");
}

#[tokio::test]
async fn test_signup_validation_error() {
    let app = common::app(common::memory_state());

    let (status, body) = post(
        &app,
        "/api/v1/auth/signup",
        json!({ "username": "al", "email": "not-an-email", "password": "123" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["status"], "422");
}

#[tokio::test]
async fn test_signin_errors() {
    let app = common::app(common::memory_state());
    signup(&app, "alice", "a@x.com").await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/signin",
        json!({ "username": "alice", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errors"][0]["detail"], "Password is incorrect");

    let (status, body) = post(
        &app,
        "/api/v1/auth/signin",
        json!({ "username": "nobody", "password": "pw1234" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"][0]["detail"], "User does not exist");
}

#[tokio::test]
async fn test_refresh_rotation_over_http() {
    let app = common::app(common::memory_state());
    let (_, body) = signup(&app, "alice", "a@x.com").await;
    let (_, first_refresh) = tokens(&body);

    let (status, body) = post(
        &app,
        "/api/v1/auth/signin",
        json!({ "username": "alice", "password": "pw1234" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, second_refresh) = tokens(&body);
    assert_ne!(first_refresh, second_refresh);

    // Superseded by the signin
    let (status, _) = post(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": first_refresh }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": second_refresh }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, third_refresh) = tokens(&body);
    assert_ne!(third_refresh, second_refresh);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = common::app(common::memory_state());
    let (_, body) = signup(&app, "alice", "a@x.com").await;
    let (access, refresh) = tokens(&body);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::authed_request(
                "POST",
                "/api/v1/auth/logout",
                &access,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let (status, body) = post(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errors"][0]["detail"], "Access denied");
}

#[tokio::test]
async fn test_logout_requires_access_token() {
    let app = common::app(common::memory_state());
    let (_, body) = signup(&app, "alice", "a@x.com").await;
    let (_, refresh) = tokens(&body);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/v1/auth/logout",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A refresh token is not an access token
    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/v1/auth/logout",
            &refresh,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_full_flow_against_postgres() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let app = common::app(common::postgres_state(pool.clone()));

    let (status, body) = signup(&app, "pg_alice", "pg_alice@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    let (access, refresh) = tokens(&body);

    let (status, _) = signup(&app, "pg_alice", "another@example.com").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = post(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, rotated) = tokens(&body);

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "POST",
            "/api/v1/auth/logout",
            &access,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = post(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": rotated }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup_test_db(&pool).await;
}
