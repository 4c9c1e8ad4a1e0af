//! storefront-server binary

use std::sync::Arc;

use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_core::PlanCatalog;
use storefront_payments::{CreemClient, PaymentProvider, ProductIdMap};
use storefront_server::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize payments
    let provider: Option<Arc<dyn PaymentProvider>> = match CreemClient::from_env() {
        Ok(client) => {
            tracing::info!(base_url = %client.config().base_url, "✓ Creem configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "⚠ Creem not configured - payments disabled");
            tracing::warn!("  Set CREEM_API_KEY in .env");
            None
        }
    };

    let catalog = PlanCatalog::standard();
    let products = ProductIdMap::from_env(catalog.ids());
    tracing::info!(
        "Resolved {} of {} plan product ids",
        products.len(),
        catalog.ids().count()
    );

    let state = AppState::new(provider, products);

    // Static files (WASM frontend) serve everything the API doesn't
    let app = router(state).fallback_service(ServeDir::new(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 storefront-server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/products?ids= - Product price lookup");
    tracing::info!("  POST /api/checkout      - Create hosted checkout");
    tracing::info!("  *    /                  - Static files from {}", config.static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
