//! Route definitions for the `/skills` resource.
//!
//! All routes require a bearer token; handlers extract the caller themselves.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{history, skill};
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// GET    /                       -> list_skills
/// POST   /                       -> create_skill
/// GET    /{id}                   -> get_skill
/// PUT    /{id}                   -> rename_skill
/// DELETE /{id}                   -> delete_skill
///
/// POST   /{id}/add-time          -> add_time
/// POST   /{id}/remove-time       -> remove_time
///
/// GET    /{id}/history           -> list_months
/// GET    /{id}/history/{month}   -> get_month
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skill::list_skills).post(skill::create_skill))
        .route(
            "/{id}",
            get(skill::get_skill)
                .put(skill::rename_skill)
                .delete(skill::delete_skill),
        )
        .route("/{id}/add-time", post(skill::add_time))
        .route("/{id}/remove-time", post(skill::remove_time))
        .route("/{id}/history", get(history::list_months))
        .route("/{id}/history/{month}", get(history::get_month))
}
