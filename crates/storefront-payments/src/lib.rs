//! # storefront-payments
//!
//! Server-side payment provider integration for the storefront.
//!
//! ## Hosted checkout
//!
//! ```text
//! ┌─────────────┐  POST /api/checkout  ┌─────────────┐  POST /v1/checkouts  ┌─────────────┐
//! │   Browser   │─────────────────────▶│  Storefront │─────────────────────▶│  Provider   │
//! │  (pricing)  │◀─────────────────────│   server    │◀─────────────────────│  (Creem)    │
//! └──────┬──────┘     checkoutUrl      └─────────────┘     checkout_url     └─────────────┘
//!        │
//!        └──────────── full-page redirect to the hosted checkout page
//! ```
//!
//! Product id resolution happens here: the id sent by the browser wins,
//! otherwise the plan id is looked up in the server's [`ProductIdMap`]. An
//! unresolved product fails before the provider is contacted.
//!
//! ## Price lookup
//!
//! [`lookup_products`] fans one provider request out per product id and
//! reports per-id failures next to the successes instead of failing the batch.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_payments::{create_checkout_session, CreemClient, ProductIdMap};
//!
//! let client = CreemClient::from_env()?;
//! let products = ProductIdMap::from_env(["basic", "pro", "max"]);
//!
//! let session = create_checkout_session(&client, &payload, &products, chrono::Utc::now()).await?;
//! // Redirect user to: session.checkout_url
//! ```

mod checkout;
mod config;
mod creem;
mod error;
mod lookup;
pub mod mock;
mod product_map;
mod provider;

pub use checkout::{
    build_checkout_request, create_checkout_session, CheckoutSession, CheckoutSessionRequest,
};
pub use config::{ProviderConfig, DEFAULT_API_BASE};
pub use creem::CreemClient;
pub use error::{PaymentError, Result};
pub use lookup::{lookup_products, parse_id_list, MAX_LOOKUP_IDS};
pub use product_map::{ProductIdMap, ProductResolution};
pub use provider::{PaymentProvider, ProviderCheckout};
