//! Mock Storefront
//!
//! Canned responses plus a record of every call, for tests and offline demos.

use std::cell::RefCell;

use async_trait::async_trait;

use crate::api::StorefrontApi;
use crate::error::ApiError;
use crate::wire::{CheckoutPayload, CheckoutReply, ProductsResponse};

/// In-memory [`StorefrontApi`] with scripted replies
pub struct MockStorefront {
    products: Result<ProductsResponse, ApiError>,
    checkout: Result<CheckoutReply, ApiError>,
    product_calls: RefCell<Vec<Vec<String>>>,
    checkout_calls: RefCell<Vec<CheckoutPayload>>,
}

impl Default for MockStorefront {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStorefront {
    /// Empty product list, checkout with no URL
    pub fn new() -> Self {
        Self {
            products: Ok(ProductsResponse::default()),
            checkout: Ok(CheckoutReply::default()),
            product_calls: RefCell::new(Vec::new()),
            checkout_calls: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_products(mut self, products: Result<ProductsResponse, ApiError>) -> Self {
        self.products = products;
        self
    }

    #[must_use]
    pub fn with_checkout(mut self, checkout: Result<CheckoutReply, ApiError>) -> Self {
        self.checkout = checkout;
        self
    }

    /// Reply with a checkout URL
    #[must_use]
    pub fn with_checkout_url(self, url: impl Into<String>) -> Self {
        self.with_checkout(Ok(CheckoutReply {
            checkout_url: Some(url.into()),
            checkout: None,
        }))
    }

    /// Id sets passed to `lookup_products`, one entry per call
    pub fn product_calls(&self) -> Vec<Vec<String>> {
        self.product_calls.borrow().clone()
    }

    /// Payloads passed to `create_checkout`, one entry per call
    pub fn checkout_calls(&self) -> Vec<CheckoutPayload> {
        self.checkout_calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl StorefrontApi for MockStorefront {
    async fn lookup_products(&self, ids: &[String]) -> Result<ProductsResponse, ApiError> {
        self.product_calls.borrow_mut().push(ids.to_vec());
        self.products.clone()
    }

    async fn create_checkout(&self, payload: &CheckoutPayload) -> Result<CheckoutReply, ApiError> {
        self.checkout_calls.borrow_mut().push(payload.clone());
        self.checkout.clone()
    }
}
