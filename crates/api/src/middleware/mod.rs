//! Request extractors that run before handlers.
//!
//! - [`auth::AuthUser`] -- resolves the caller from a JWT Bearer token.

pub mod auth;
