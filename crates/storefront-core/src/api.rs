//! Storefront API seam
//!
//! The browser talks to the storefront server through this trait. The web
//! crate implements it with `reqwest`; tests use [`crate::mock::MockStorefront`].

use async_trait::async_trait;

use crate::error::ApiError;
use crate::wire::{CheckoutPayload, CheckoutReply, ProductsResponse};

/// Client side of the storefront server endpoints
///
/// Futures are not `Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait StorefrontApi {
    /// `GET /api/products?ids=...`, one request for the whole id set
    async fn lookup_products(&self, ids: &[String]) -> Result<ProductsResponse, ApiError>;

    /// `POST /api/checkout`
    async fn create_checkout(&self, payload: &CheckoutPayload) -> Result<CheckoutReply, ApiError>;
}
