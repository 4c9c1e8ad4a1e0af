//! Storefront HTTP Server
//!
//! Axum server behind the pricing page: batched product price lookups,
//! hosted checkout session creation and the compiled web app.

pub mod config;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{create_checkout, health_check, list_products};
pub use crate::config::ServerConfig;
pub use crate::state::AppState;

/// API routes with CORS and request tracing. Static files are attached by
/// the binary so tests can drive the API alone.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))
        // Pricing
        .route("/api/products", get(list_products))
        .route("/api/checkout", post(create_checkout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
