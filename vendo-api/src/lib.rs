use axum::{http::Method, routing::get, routing::post, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod carts;
pub mod error;
pub mod products;
pub mod state;
pub mod webhooks;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/products", get(products::list_products))
        .route("/products/{id}", get(products::get_product))
        .route("/carts", post(carts::create_cart))
        .route("/carts/{id}", get(carts::get_cart).patch(carts::update_cart))
        .route(
            "/webhook/whatsapp",
            get(webhooks::verify_whatsapp).post(webhooks::receive_whatsapp),
        )
        .route("/test/{message}", get(webhooks::test_agent))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Vendo storefront API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
