pub mod auth;
pub mod health;
pub mod skill;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
/// /auth/me                               current user (requires auth)
///
/// /skills                                list, create
/// /skills/{id}                           get, rename, delete
/// /skills/{id}/add-time                  add hours and minutes (POST)
/// /skills/{id}/remove-time               remove whole hours (POST)
/// /skills/{id}/history                   monthly summary (GET)
/// /skills/{id}/history/{month}           records of one month (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Skill registry, time ledger and history views.
        .nest("/skills", skill::router())
}
