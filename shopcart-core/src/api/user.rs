//! Profile endpoints of the signed-in user

use crate::domain::{UpdateProfileInput, UserResponse};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

/// GET /api/users
pub async fn get_profile<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let user = state.user_service().get_profile(auth.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/users
pub async fn update_profile<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    WithRejection(Json(input), _): WithRejection<Json<UpdateProfileInput>, AppError>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service()
        .update_profile(auth.user_id, input)
        .await?;
    Ok(Json(UserResponse::from(user)))
}
