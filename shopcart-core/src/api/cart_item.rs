//! Cart item endpoints
//!
//! `POST /api/cartItems/{id}` takes a cart id; the other verbs on the same
//! path take a cart item id.

use crate::api::MessageResponse;
use crate::domain::{CreateCartItemInput, UpdateCartItemInput};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

/// Add a product to one of the caller's carts
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    WithRejection(Path(cart_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<CreateCartItemInput>, AppError>,
) -> Result<impl IntoResponse> {
    let item = state
        .cart_service()
        .create_cart_item(cart_id, auth.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse> {
    let item = state.cart_service().get_cart_item(id).await?;
    Ok(Json(item))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateCartItemInput>, AppError>,
) -> Result<impl IntoResponse> {
    let item = state.cart_service().update_cart_item(id, input).await?;
    Ok(Json(item))
}

/// Remove an item from a cart the caller owns
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<impl IntoResponse> {
    state
        .cart_service()
        .delete_cart_item(id, auth.user_id)
        .await?;
    Ok(Json(MessageResponse::new("Cart item deleted successfully")))
}
