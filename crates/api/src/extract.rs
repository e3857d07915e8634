//! JSON body extraction with rejections in the API error envelope.
//!
//! [`AppJson`] wraps axum's `Json` so malformed bodies come back as
//! `{error, code}` like every other error instead of axum's plain-text 422.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use skilltrack_core::error::CoreError;
use skilltrack_db::models::skill::{AddTime, CreateSkill, RemoveTime, RenameSkill};

use crate::error::AppError;
use crate::handlers::auth::{CredentialsRequest, RefreshRequest};

/// A request body type accepted through [`AppJson`].
pub trait JsonBody: DeserializeOwned {
    /// Error for a body that is not a valid `Self`.
    fn malformed(message: String) -> CoreError {
        CoreError::Validation(message)
    }
}

impl JsonBody for CreateSkill {}
impl JsonBody for RenameSkill {}
impl JsonBody for CredentialsRequest {}
impl JsonBody for RefreshRequest {}

impl JsonBody for AddTime {
    fn malformed(message: String) -> CoreError {
        CoreError::InvalidAmount(message)
    }
}

impl JsonBody for RemoveTime {
    fn malformed(message: String) -> CoreError {
        CoreError::InvalidAmount(message)
    }
}

/// Map a `Json` rejection onto [`AppError`].
///
/// Bodies that fail to parse or deserialize use the body type's
/// [`JsonBody::malformed`] error; a missing content type or unreadable
/// body is a plain `BadRequest`.
pub fn reject<T: JsonBody>(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::Core(T::malformed(e.body_text())),
        JsonRejection::JsonSyntaxError(e) => AppError::Core(T::malformed(e.body_text())),
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Drop-in replacement for `axum::Json` in handler arguments.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: JsonBody,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(reject::<T>(rejection)),
        }
    }
}
