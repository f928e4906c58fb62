//! Session authentication: caller resolution and the `AuthUser` extractor
//!
//! The session token is looked up in the `access_token` cookie first and
//! then in an `Authorization: Bearer` header.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::state::HasServices;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "access_token";

/// Resolve the caller's user id from an optional session token.
///
/// No I/O: a valid signature and unexpired claims are all it takes.
pub fn resolve_caller(jwt_manager: &JwtManager, token: Option<&str>) -> Result<i64> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;
    jwt_manager.verify_session_token(token)
}

/// Extract a Bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Find the session token of a request, cookie first
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    // A cleared cookie (`access_token=`) does not shadow the header.
    if let Some(value) = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
    {
        return Some(value.to_string());
    }
    extract_bearer_token(headers).map(str::to_string)
}

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let token = session_token(&parts.headers);
        let user_id = resolve_caller(state.jwt_manager(), token.as_deref())?;
        Ok(AuthUser { user_id })
    }
}
