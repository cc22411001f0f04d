use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use vendo_core::error::CommerceError;
use vendo_core::product::Product;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    pub q: Option<String>,
}

/// GET /products
/// List the catalog, optionally filtered by a substring of name or description.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .catalog
        .list(params.q.as_deref())
        .await
        .map_err(CommerceError::store)?;

    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .catalog
        .get(id)
        .await
        .map_err(CommerceError::store)?
        .ok_or(CommerceError::ProductNotFound(id))?;

    Ok(Json(product))
}
