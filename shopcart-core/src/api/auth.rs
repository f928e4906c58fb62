//! Signup, login and logout
//!
//! The session token travels in the HTTP-only `access_token` cookie.

use crate::api::MessageResponse;
use crate::domain::{LoginInput, SignupInput};
use crate::error::{AppError, Result};
use crate::middleware::SESSION_COOKIE;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};

/// POST /api/auth/signup
pub async fn signup<S: HasServices>(
    State(state): State<S>,
    WithRejection(Json(input), _): WithRejection<Json<SignupInput>, AppError>,
) -> Result<impl IntoResponse> {
    state.auth_service().signup(input).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("User created"))))
}

/// POST /api/auth/login
pub async fn login<S: HasServices>(
    State(state): State<S>,
    jar: CookieJar,
    WithRejection(Json(input), _): WithRejection<Json<LoginInput>, AppError>,
) -> Result<impl IntoResponse> {
    let (_, token) = state.auth_service().login(input).await?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(state.config().cookie_secure);

    Ok((jar.add(cookie), Json(MessageResponse::new("Logged in"))))
}

/// POST /api/auth/logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let removal = Cookie::build(SESSION_COOKIE).path("/");
    (jar.remove(removal), Json(MessageResponse::new("Logged out")))
}
