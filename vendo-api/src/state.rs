use std::sync::Arc;

use vendo_agent::SalesAgent;
use vendo_cart::CartEngine;
use vendo_core::repository::{CartRepository, CatalogRepository};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub engine: Arc<CartEngine>,
    pub agent: Arc<SalesAgent>,
    pub webhook_verify_token: String,
}
