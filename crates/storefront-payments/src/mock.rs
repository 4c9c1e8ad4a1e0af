//! Mock Payment Provider
//!
//! For testing and local development without provider credentials.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::json;
use storefront_core::RemoteProduct;

use crate::checkout::CheckoutSessionRequest;
use crate::error::{PaymentError, Result};
use crate::provider::{PaymentProvider, ProviderCheckout};

/// In-memory provider with static products and a scripted checkout reply
pub struct MockProvider {
    products: HashMap<String, Result<RemoteProduct>>,
    checkout: Result<ProviderCheckout>,
    product_requests: AtomicUsize,
    checkout_requests: Mutex<Vec<CheckoutSessionRequest>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// No products; checkout succeeds without a URL
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
            checkout: Ok(ProviderCheckout {
                checkout_url: None,
                raw: json!({}),
            }),
            product_requests: AtomicUsize::new(0),
            checkout_requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_product(mut self, product: RemoteProduct) -> Self {
        self.products.insert(product.id.clone(), Ok(product));
        self
    }

    #[must_use]
    pub fn with_product_error(mut self, id: impl Into<String>, err: PaymentError) -> Self {
        self.products.insert(id.into(), Err(err));
        self
    }

    #[must_use]
    pub fn with_checkout(mut self, checkout: Result<ProviderCheckout>) -> Self {
        self.checkout = checkout;
        self
    }

    /// Checkout reply carrying `url`, shaped like the provider's body
    #[must_use]
    pub fn with_checkout_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_checkout(Ok(ProviderCheckout {
            raw: json!({ "id": "ch_mock", "checkout_url": url }),
            checkout_url: Some(url),
        }))
    }

    /// Number of `fetch_product` calls so far
    pub fn product_requests(&self) -> usize {
        self.product_requests.load(Ordering::SeqCst)
    }

    /// Checkout requests received so far
    pub fn checkout_requests(&self) -> Vec<CheckoutSessionRequest> {
        self.checkout_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn fetch_product(&self, product_id: &str) -> Result<RemoteProduct> {
        self.product_requests.fetch_add(1, Ordering::SeqCst);
        self.products.get(product_id).cloned().unwrap_or_else(|| {
            Err(PaymentError::Provider {
                status: 404,
                message: None,
            })
        })
    }

    async fn create_checkout(&self, request: &CheckoutSessionRequest) -> Result<ProviderCheckout> {
        self.checkout_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.checkout.clone()
    }

    fn name(&self) -> &str {
        "MockProvider"
    }
}
