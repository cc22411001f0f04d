use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use vendo_core::cart::{Cart, CartItem};
use vendo_core::error::CommerceError;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub items: Vec<CartItem>,
}

/// POST /carts
/// Validate and price the requested items, then persist a new cart.
pub async fn create_cart(
    State(state): State<AppState>,
    Json(req): Json<CartRequest>,
) -> Result<(StatusCode, Json<Cart>), ApiError> {
    let cart = state.engine.create_cart(&req.items).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// GET /carts/{id}
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Cart>, ApiError> {
    let cart = state
        .carts
        .get(id)
        .await
        .map_err(CommerceError::store)?
        .ok_or(CommerceError::CartNotFound(id))?;

    Ok(Json(cart))
}

/// PATCH /carts/{id}
/// Wholly replace the cart's line list; items with qty <= 0 drop lines.
pub async fn update_cart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CartRequest>,
) -> Result<Json<Cart>, ApiError> {
    let cart = state.engine.update_cart(id, &req.items).await?;
    Ok(Json(cart))
}
