//! HTTP Handlers

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use storefront_core::{CheckoutPayload, CheckoutReply, ProductsResponse};
use storefront_payments::{
    create_checkout_session, lookup_products, parse_id_list, PaymentError, PaymentProvider,
};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub payments_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    #[serde(default)]
    pub ids: Option<String>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn payment_failure(err: &PaymentError) -> HandlerError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: err.code().into(),
        }),
    )
}

fn require_provider(state: &AppState) -> Result<Arc<dyn PaymentProvider>, HandlerError> {
    state.provider.clone().ok_or_else(|| {
        let err = PaymentError::Config("CREEM_API_KEY is missing on the server.".into());
        tracing::error!(error = %err, "Payments not configured");
        payment_failure(&err)
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        payments_configured: state.provider.is_some(),
    })
}

/// Batched product price lookup: `GET /api/products?ids=a,b`
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductsResponse>, HandlerError> {
    let provider = require_provider(&state)?;

    let ids = parse_id_list(query.ids.as_deref().unwrap_or_default()).map_err(|e| {
        tracing::warn!(error = %e, "Product lookup rejected");
        payment_failure(&e)
    })?;
    let response = lookup_products(provider.as_ref(), &ids).await;

    Ok(Json(response))
}

/// Create a hosted checkout session: `POST /api/checkout`
///
/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CheckoutReply>, HandlerError> {
    let provider = require_provider(&state)?;

    let payload: CheckoutPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Unparsable checkout payload");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Unable to parse request payload.".into(),
                code: "INVALID_PAYLOAD".into(),
            }),
        )
    })?;

    let session = create_checkout_session(
        provider.as_ref(),
        &payload,
        &state.products,
        chrono::Utc::now(),
    )
    .await
    .map_err(|e| {
        tracing::error!(
            plan = ?payload.plan_id,
            product_id = ?payload.product_id,
            error = %e,
            "Checkout error"
        );
        payment_failure(&e)
    })?;

    tracing::info!(
        request_id = %session.request_id,
        product_id = %session.product_id,
        "Checkout session created"
    );

    Ok(Json(CheckoutReply {
        checkout_url: Some(session.checkout_url),
        checkout: Some(session.raw),
    }))
}
