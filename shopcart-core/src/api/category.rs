//! Category API handlers

use crate::api::{MessageResponse, PaginationQuery};
use crate::domain::{CreateCategoryInput, UpdateCategoryInput};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

/// List categories
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Query(pagination), _): WithRejection<Query<PaginationQuery>, AppError>,
) -> Result<impl IntoResponse> {
    let categories = state
        .category_service()
        .list(pagination.skip, pagination.limit)
        .await?;
    Ok(Json(categories))
}

/// Get category by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse> {
    let category = state.category_service().get(id).await?;
    Ok(Json(category))
}

/// Create category
pub async fn create<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Json(input), _): WithRejection<Json<CreateCategoryInput>, AppError>,
) -> Result<impl IntoResponse> {
    let category = state.category_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update category
pub async fn update<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateCategoryInput>, AppError>,
) -> Result<impl IntoResponse> {
    let category = state.category_service().update(id, input).await?;
    Ok(Json(category))
}

/// Delete category
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse> {
    state.category_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
