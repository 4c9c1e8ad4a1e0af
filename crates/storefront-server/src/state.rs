//! Application State

use std::sync::Arc;

use storefront_payments::{PaymentProvider, ProductIdMap};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (optional - None if the credential is missing)
    pub provider: Option<Arc<dyn PaymentProvider>>,

    /// Server-side plan → product fallback
    pub products: Arc<ProductIdMap>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn PaymentProvider>>, products: ProductIdMap) -> Self {
        Self {
            provider,
            products: Arc::new(products),
        }
    }
}
