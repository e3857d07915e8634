//! HTTP-level integration tests for registration, login, token refresh and
//! logout.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, post_auth, post_json, register_and_login,
};
use skilltrack_db::repositories::UserRepo;
use sqlx::PgPool;

async fn login(pool: &PgPool, username: &str, password: &str) -> axum::response::Response {
    post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_stores_a_password_hash(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/register",
        serde_json::json!({ "username": " ada ", "password": "correct horse" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "ada");
    assert!(json["data"].get("password_hash").is_none());

    let user = UserRepo::find_by_username(&pool, "ada").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "correct horse");
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_username_returns_409(pool: PgPool) {
    register_and_login(&pool, "ada").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/register",
        serde_json::json!({ "username": "ada", "password": "another password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_pair(pool: PgPool) {
    let (_, user_id) = register_and_login(&pool, "ada").await;

    let response = login(&pool, "ada", "correct horse").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["expires_in"], 15 * 60);
    assert_eq!(json["data"]["user"]["id"], user_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_user_look_the_same(pool: PgPool) {
    register_and_login(&pool, "ada").await;

    let wrong = body_json(login(&pool, "ada", "incorrect horse").await).await;
    let unknown = body_json(login(&pool, "nobody", "correct horse").await).await;

    assert_eq!(wrong["code"], "UNAUTHORIZED");
    assert_eq!(wrong, unknown);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_the_caller(pool: PgPool) {
    let (token, user_id) = register_and_login(&pool, "ada").await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["username"], "ada");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_token_works_once(pool: PgPool) {
    register_and_login(&pool, "ada").await;
    let json = body_json(login(&pool, "ada", "correct horse").await).await;
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["data"]["refresh_token"], body["refresh_token"]);

    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    register_and_login(&pool, "ada").await;
    let json = body_json(login(&pool, "ada", "correct horse").await).await;
    let access = json["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = post_auth(build_test_app(pool.clone()), "/api/v1/auth/logout", &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}
