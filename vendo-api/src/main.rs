use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vendo_agent::{GeminiClient, SalesAgent, StorefrontClient};
use vendo_api::{app, AppState};
use vendo_cart::CartEngine;
use vendo_store::{importer, DbClient, SqliteCartRepository, SqliteCatalogRepository};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendo_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = vendo_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Vendo API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to open database");
    db.init_schema().await.expect("Failed to initialize schema");

    if let Some(seed_file) = &config.catalog.seed_file {
        match importer::load_seed_file(&db.pool, seed_file).await {
            Ok(count) if count > 0 => tracing::info!(count, "catalog seeded"),
            Ok(_) => {}
            Err(err) => tracing::error!(error = %err, "catalog seeding failed"),
        }
    }

    let catalog: Arc<SqliteCatalogRepository> =
        Arc::new(SqliteCatalogRepository::new(db.pool.clone()));
    let carts: Arc<SqliteCartRepository> = Arc::new(SqliteCartRepository::new(db.pool.clone()));
    let engine = Arc::new(CartEngine::new(catalog.clone(), carts.clone()));

    let timeout = Duration::from_secs(config.agent.request_timeout_seconds);
    let llm = match &config.agent.gemini_api_key {
        Some(key) if !key.is_empty() => Some(
            GeminiClient::new(key.clone(), config.agent.gemini_model.clone(), timeout)
                .expect("Failed to build Gemini client"),
        ),
        _ => {
            tracing::warn!("no Gemini API key configured, agent runs keyword logic only");
            None
        }
    };
    let storefront = StorefrontClient::new(config.agent.api_base_url.clone(), timeout)
        .expect("Failed to build storefront client");
    let agent = Arc::new(SalesAgent::new(llm, storefront, catalog.clone()));

    let app_state = AppState {
        catalog,
        carts,
        engine,
        agent,
        webhook_verify_token: config.webhook.verify_token.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
