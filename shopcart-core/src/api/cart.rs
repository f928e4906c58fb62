//! Cart endpoints, scoped to the signed-in user

use crate::api::{MessageResponse, PaginationQuery};
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

/// POST /api/cart
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let cart = state.cart_service().create_cart(auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// GET /api/cart
pub async fn get_own<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let cart = state.cart_service().get_cart(auth.user_id).await?;
    Ok(Json(cart))
}

/// DELETE /api/cart
pub async fn delete_own<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    state.cart_service().delete_cart(auth.user_id).await?;
    Ok(Json(MessageResponse::new("Cart deleted successfully")))
}

/// GET /api/cart/items/{cart_id}
pub async fn list_items<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(cart_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Query(pagination), _): WithRejection<Query<PaginationQuery>, AppError>,
) -> Result<impl IntoResponse> {
    let items = state
        .cart_service()
        .list_cart_items(cart_id, pagination.skip, pagination.limit)
        .await?;
    Ok(Json(items))
}
