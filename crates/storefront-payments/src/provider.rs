//! Payment Provider abstraction

use async_trait::async_trait;
use serde_json::Value;
use storefront_core::RemoteProduct;

use crate::checkout::CheckoutSessionRequest;
use crate::error::Result;

/// Checkout as returned by the provider
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderCheckout {
    /// Hosted checkout page, when the provider sent one
    pub checkout_url: Option<String>,

    /// Full provider response body
    pub raw: Value,
}

/// Payment provider client trait
///
/// Implemented by [`crate::CreemClient`] and [`crate::mock::MockProvider`].
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Fetch one product by its provider id
    async fn fetch_product(&self, product_id: &str) -> Result<RemoteProduct>;

    /// Create a hosted checkout session
    async fn create_checkout(&self, request: &CheckoutSessionRequest) -> Result<ProviderCheckout>;

    /// Provider name
    fn name(&self) -> &str;
}
