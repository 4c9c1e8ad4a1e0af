//! Product Price Sync
//!
//! Reconciles the displayed catalog with the payment provider's prices.
//! Failures never blank out a price: the nominal record stays and the caller
//! gets an advisory to show.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::api::StorefrontApi;
use crate::catalog::Plan;
use crate::wire::RemoteProduct;

/// Advisory when the batch lookup fails without a server message
pub const SYNC_FAILED_ADVISORY: &str = "Unable to sync prices, please try again later.";

/// Advisory when some ids in an otherwise successful batch failed
pub const PARTIAL_SYNC_ADVISORY: &str =
    "Some prices could not be synced automatically. Please try again later.";

/// Result of one sync pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Full plan list; unresolved plans are untouched
    pub plans: Vec<Plan>,

    /// Non-blocking notice for the page ("prices may be out of date")
    pub advisory: Option<String>,

    /// True when the batch request itself failed
    pub failed: bool,
}

impl SyncOutcome {
    fn unchanged(plans: &[Plan]) -> Self {
        Self {
            plans: plans.to_vec(),
            advisory: None,
            failed: false,
        }
    }
}

/// Product ids of the plans that have one, de-duplicated, in display order
pub fn product_ids(plans: &[Plan]) -> Vec<String> {
    let mut seen = HashSet::new();
    plans
        .iter()
        .filter_map(Plan::product_id)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Merge provider products into `plans`, producing new values.
///
/// Plans without a product id, or whose id is not in `products`, are
/// returned as they are.
pub fn apply_products(plans: &[Plan], products: &[RemoteProduct]) -> Vec<Plan> {
    let by_id: HashMap<&str, &RemoteProduct> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();

    plans
        .iter()
        .map(|plan| {
            let Some(product) = plan.product_id().and_then(|id| by_id.get(id)) else {
                return plan.clone();
            };

            let amount = Decimal::new(product.price, 2).normalize();
            let currency = product
                .currency
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(&plan.price.currency);

            Plan {
                price: plan.price.repriced(amount, currency, plan.billing_cycle),
                ..plan.clone()
            }
        })
        .collect()
}

/// Fetch provider prices for every plan with a product id and merge them.
///
/// No request is made when no plan has a product id.
pub async fn sync_prices<A>(api: &A, plans: &[Plan]) -> SyncOutcome
where
    A: StorefrontApi + ?Sized,
{
    let ids = product_ids(plans);
    if ids.is_empty() {
        tracing::debug!("No plan has a product id, skipping price sync");
        return SyncOutcome::unchanged(plans);
    }

    match api.lookup_products(&ids).await {
        Ok(response) => {
            let updated = apply_products(plans, &response.products);

            let advisory = if response.errors.is_empty() {
                None
            } else {
                for err in &response.errors {
                    tracing::warn!(
                        product_id = %err.id,
                        reason = %err.message,
                        "Product price unavailable"
                    );
                }
                Some(PARTIAL_SYNC_ADVISORY.to_string())
            };

            tracing::info!(
                requested = ids.len(),
                resolved = response.products.len(),
                failed = response.errors.len(),
                "Price sync finished"
            );

            SyncOutcome {
                plans: updated,
                advisory,
                failed: false,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Price sync failed, keeping nominal prices");
            let advisory = e
                .server_message()
                .map_or_else(|| SYNC_FAILED_ADVISORY.to_string(), str::to_string);

            SyncOutcome {
                plans: plans.to_vec(),
                advisory: Some(advisory),
                failed: true,
            }
        }
    }
}
