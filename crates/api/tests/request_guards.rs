//! HTTP tests for requests rejected before the database is touched.
//!
//! These run against a lazy pool that never connects, so they need no
//! PostgreSQL instance.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_offline_app, get, get_auth, post_auth, post_json, post_json_auth,
    token_for,
};

// ---------------------------------------------------------------------------
// Session gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn skills_require_a_token() {
    let response = get(build_offline_app(), "/api/v1/skills").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let response = get_auth(build_offline_app(), "/api/v1/skills/1", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn history_requires_a_token() {
    let response = get(build_offline_app(), "/api/v1/skills/1/history").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_a_token() {
    let response = get(build_offline_app(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Ledger amounts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn negative_hours_are_rejected() {
    let response = post_json_auth(
        build_offline_app(),
        "/api/v1/skills/1/add-time",
        serde_json::json!({ "hours": -1 }),
        &token_for(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn negative_minutes_are_rejected() {
    let response = post_json_auth(
        build_offline_app(),
        "/api/v1/skills/1/add-time",
        serde_json::json!({ "hours": 1, "minutes": -5 }),
        &token_for(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn negative_removal_is_rejected() {
    let response = post_json_auth(
        build_offline_app(),
        "/api/v1/skills/1/remove-time",
        serde_json::json!({ "hours": -3 }),
        &token_for(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn malformed_amounts_use_the_error_envelope() {
    for body in [
        serde_json::json!({ "hours": "abc" }),
        serde_json::json!({ "hours": 1.5 }),
        serde_json::json!({ "hours": 3_000_000_000_i64 }),
    ] {
        let response = post_json_auth(
            build_offline_app(),
            "/api/v1/skills/1/add-time",
            body.clone(),
            &token_for(1),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(body_json(response).await["code"], "INVALID_AMOUNT", "body {body}");
    }
}

#[tokio::test]
async fn malformed_removal_uses_the_error_envelope() {
    let response = post_json_auth(
        build_offline_app(),
        "/api/v1/skills/1/remove-time",
        serde_json::json!({ "hours": "two" }),
        &token_for(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn missing_json_body_is_bad_request() {
    let response = post_auth(
        build_offline_app(),
        "/api/v1/skills/1/add-time",
        &token_for(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_skill_name_is_a_validation_error() {
    let response = post_json_auth(
        build_offline_app(),
        "/api/v1/skills",
        serde_json::json!({ "name": 42 }),
        &token_for(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// History month keys
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_month_key_is_rejected() {
    for key in ["2024-13", "2024-1", "march", "2024-03-01"] {
        let response = get_auth(
            build_offline_app(),
            &format!("/api/v1/skills/1/history/{key}"),
            &token_for(1),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "key {key}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Registration input
// ---------------------------------------------------------------------------

#[tokio::test]
async fn short_password_is_rejected() {
    let response = post_json(
        build_offline_app(),
        "/api/v1/auth/register",
        serde_json::json!({ "username": "ada", "password": "short" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn blank_username_is_rejected() {
    let response = post_json(
        build_offline_app(),
        "/api/v1/auth/register",
        serde_json::json!({ "username": "   ", "password": "long enough password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = get(build_offline_app(), "/api/v1/skills").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(build_offline_app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
