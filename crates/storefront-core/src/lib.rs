//! # storefront-core
//!
//! Pricing and checkout logic shared by the storefront server and the web app.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ PlanCatalog  │──▶│ sync_prices  │──▶│ PricingView  │──▶│start_checkout│
//! │  (nominal)   │   │ (batch GET)  │   │ (UI state)   │   │ (POST, 1x)   │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                                                 │
//!                                                  hosted checkout URL ──▶ redirect
//! ```
//!
//! The crate never talks HTTP itself. Everything that crosses the network goes
//! through the [`StorefrontApi`] trait, implemented with `reqwest` by the web
//! crate and by [`mock::MockStorefront`] in tests.

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod currency;
pub mod error;
pub mod mock;
pub mod sync;
pub mod view;
pub mod wire;

pub use api::StorefrontApi;
pub use catalog::{BillingCycle, CreditsHighlight, Feature, Plan, PlanCatalog, PriceRecord};
pub use checkout::{start_checkout, CheckoutOptions, CheckoutRedirect};
pub use currency::format_currency;
pub use error::{ApiError, CheckoutError};
pub use sync::{sync_prices, SyncOutcome};
pub use view::{ButtonState, PricingView, SyncState};
pub use wire::{
    CheckoutPayload, CheckoutReply, CustomerHint, ErrorBody, ProductLookupError,
    ProductsResponse, RemoteProduct,
};
