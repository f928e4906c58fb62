//! Product API handlers

use crate::api::{MessageResponse, PaginationQuery};
use crate::domain::{CreateProductInput, UpdateProductInput};
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

/// List products
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Query(pagination), _): WithRejection<Query<PaginationQuery>, AppError>,
) -> Result<impl IntoResponse> {
    let products = state
        .product_service()
        .list(pagination.skip, pagination.limit)
        .await?;
    Ok(Json(products))
}

/// Get product by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().get(id).await?;
    Ok(Json(product))
}

/// Create product
pub async fn create<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Json(input), _): WithRejection<Json<CreateProductInput>, AppError>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update product
pub async fn update<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateProductInput>, AppError>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().update(id, input).await?;
    Ok(Json(product))
}

/// Delete product
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse> {
    state.product_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
