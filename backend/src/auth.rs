//! Credentials: bearer-token extraction and secret generation
//!
//! Sessions are protected by a password handed out on creation, and each seat
//! by a token handed out on join. Both are random UUID v4 strings and both
//! travel as `Authorization: Bearer <secret>`.

use crate::error::ApiError;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Secret taken from the `Authorization: Bearer` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bearer(pub String);

impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|secret| Bearer(secret.to_string()))
            .ok_or_else(|| ApiError::Unauthorized("Missing or invalid Authorization header".into()))
    }
}

/// Fresh random secret for a session password or seat token
pub fn generate_secret() -> String {
    Uuid::new_v4().to_string()
}
