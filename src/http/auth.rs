//! Caller identity extraction.
//!
//! Authentication happens upstream: a gateway validates the bearer token
//! and forwards the resolved uid in the `x-uid` header. The core never
//! parses tokens; it only reads that header. Role enforcement for admin
//! routes is likewise upstream middleware.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::error::ApiError;

/// Header carrying the authenticated caller's uid.
pub const UID_HEADER: &str = "x-uid";

/// Authenticated caller identity.
#[derive(Debug, Clone)]
pub struct CallerUid(pub String);

impl<S> FromRequestParts<S> for CallerUid
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uid = parts
            .headers
            .get(UID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match uid {
            Some(uid) => Ok(CallerUid(uid.to_string())),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiError::new("UNAUTHORIZED", "Missing caller identity")),
            )
                .into_response()),
        }
    }
}
