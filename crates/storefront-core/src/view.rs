//! Pricing Page State
//!
//! ```text
//! page:    Idle ──▶ Syncing ──▶ Synced { advisory? }
//!                          └──▶ SyncFailed { advisory? }
//!
//! button:  Ready ──▶ Pending ──▶ Ready            (navigating away)
//!                           └──▶ Failed(message)  (retryable)
//! ```
//!
//! Sync and checkout are independent. The plan list is replaced wholesale on
//! every finished sync; checkout works on the snapshot taken at click time.

use std::collections::HashMap;

use crate::catalog::Plan;
use crate::checkout::CheckoutRedirect;
use crate::error::CheckoutError;
use crate::sync::{self, SyncOutcome};

/// Price sync progress for the page
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyncState {
    /// Nominal prices, no sync started
    #[default]
    Idle,
    Syncing,
    /// Prices reconciled; advisory set when some ids failed
    Synced { advisory: Option<String> },
    /// Batch failed; nominal prices shown. The advisory is `None` once
    /// dismissed.
    SyncFailed { advisory: Option<String> },
}

impl SyncState {
    pub fn is_syncing(&self) -> bool {
        matches!(self, Self::Syncing)
    }

    /// Advisory to show, if any
    pub fn advisory(&self) -> Option<&str> {
        match self {
            Self::Synced { advisory } | Self::SyncFailed { advisory } => advisory.as_deref(),
            _ => None,
        }
    }
}

/// Checkout button state for one plan
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ButtonState {
    #[default]
    Ready,
    Pending,
    Failed(String),
}

impl ButtonState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// State of one pricing page view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingView {
    plans: Vec<Plan>,
    sync: SyncState,
    buttons: HashMap<String, ButtonState>,
}

impl PricingView {
    /// Start from nominal plans
    pub fn new(plans: Vec<Plan>) -> Self {
        Self {
            plans,
            sync: SyncState::Idle,
            buttons: HashMap::new(),
        }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    pub fn button(&self, plan_id: &str) -> ButtonState {
        self.buttons.get(plan_id).cloned().unwrap_or_default()
    }

    /// Enter `Syncing` and return the product ids to look up.
    ///
    /// Returns `None` and stays put when no plan has a product id or a sync
    /// is already running.
    pub fn begin_sync(&mut self) -> Option<Vec<String>> {
        if self.sync.is_syncing() {
            return None;
        }
        let ids = sync::product_ids(&self.plans);
        if ids.is_empty() {
            return None;
        }
        self.sync = SyncState::Syncing;
        Some(ids)
    }

    /// Replace the plan list with the sync result
    pub fn finish_sync(&mut self, outcome: SyncOutcome) {
        self.plans = outcome.plans;
        self.sync = if outcome.failed {
            SyncState::SyncFailed {
                advisory: Some(
                    outcome
                        .advisory
                        .unwrap_or_else(|| sync::SYNC_FAILED_ADVISORY.into()),
                ),
            }
        } else {
            SyncState::Synced {
                advisory: outcome.advisory,
            }
        };
    }

    /// Hide the advisory. Prices and the sync outcome stay as they are.
    pub fn dismiss_advisory(&mut self) {
        if let SyncState::Synced { advisory } | SyncState::SyncFailed { advisory } = &mut self.sync
        {
            *advisory = None;
        }
    }

    /// Mark the plan's button pending and return a snapshot of the plan.
    ///
    /// `None` for unknown plans or while a checkout for the plan is pending.
    pub fn begin_checkout(&mut self, plan_id: &str) -> Option<Plan> {
        let plan = self.plan(plan_id)?.clone();
        if self.button(plan_id).is_pending() {
            return None;
        }
        self.buttons.insert(plan_id.to_string(), ButtonState::Pending);
        Some(plan)
    }

    /// Settle the plan's button. Returns the URL to navigate to on success.
    pub fn finish_checkout(
        &mut self,
        plan_id: &str,
        result: Result<CheckoutRedirect, CheckoutError>,
    ) -> Option<CheckoutRedirect> {
        match result {
            Ok(redirect) => {
                self.buttons.insert(plan_id.to_string(), ButtonState::Ready);
                Some(redirect)
            }
            Err(e) => {
                self.buttons
                    .insert(plan_id.to_string(), ButtonState::Failed(e.user_message()));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanCatalog;
    use crate::checkout::{start_checkout, CheckoutOptions};
    use crate::error::ApiError;
    use crate::mock::MockStorefront;
    use crate::sync::sync_prices;
    use crate::wire::{ProductsResponse, RemoteProduct};

    fn view_with_basic_product() -> PricingView {
        PricingView::new(
            PlanCatalog::standard()
                .with_product_ids([("basic", Some("prod_basic"))])
                .plans(),
        )
    }

    #[test]
    fn test_begin_sync_without_ids_stays_idle() {
        let mut view = PricingView::new(PlanCatalog::standard().plans());
        assert_eq!(view.begin_sync(), None);
        assert_eq!(view.sync_state(), &SyncState::Idle);
    }

    #[test]
    fn test_begin_sync_is_not_reentrant() {
        let mut view = view_with_basic_product();
        assert_eq!(view.begin_sync(), Some(vec!["prod_basic".to_string()]));
        assert!(view.sync_state().is_syncing());
        assert_eq!(view.begin_sync(), None);
    }

    #[tokio::test]
    async fn test_sync_success_updates_displayed_price() {
        let mut view = view_with_basic_product();
        let api = MockStorefront::new().with_products(Ok(ProductsResponse {
            products: vec![RemoteProduct {
                id: "prod_basic".into(),
                price: 14400,
                currency: Some("USD".into()),
            }],
            errors: vec![],
        }));

        view.begin_sync().unwrap();
        let outcome = sync_prices(&api, view.plans()).await;
        view.finish_sync(outcome);

        assert_eq!(view.sync_state(), &SyncState::Synced { advisory: None });
        assert_eq!(view.plan("basic").unwrap().price.label, "$144 /year");
    }

    #[tokio::test]
    async fn test_sync_failure_keeps_prices_and_sets_advisory() {
        let mut view = view_with_basic_product();
        let before = view.plans().to_vec();
        let api = MockStorefront::new().with_products(Err(ApiError::Transport("offline".into())));

        view.begin_sync().unwrap();
        let outcome = sync_prices(&api, view.plans()).await;
        view.finish_sync(outcome);

        assert_eq!(view.plans(), before.as_slice());
        assert_eq!(view.sync_state().advisory(), Some(sync::SYNC_FAILED_ADVISORY));

        view.dismiss_advisory();
        assert_eq!(view.sync_state().advisory(), None);
        assert_eq!(view.sync_state(), &SyncState::SyncFailed { advisory: None });
        assert_eq!(view.plans(), before.as_slice());
    }

    #[test]
    fn test_dismissing_partial_sync_advisory_keeps_synced() {
        let mut view = view_with_basic_product();
        view.begin_sync().unwrap();
        view.finish_sync(SyncOutcome {
            plans: view.plans().to_vec(),
            advisory: Some(sync::PARTIAL_SYNC_ADVISORY.into()),
            failed: false,
        });

        view.dismiss_advisory();
        assert_eq!(view.sync_state(), &SyncState::Synced { advisory: None });
    }

    #[test]
    fn test_button_disabled_while_pending() {
        let mut view = view_with_basic_product();
        assert!(view.begin_checkout("basic").is_some());
        assert!(view.button("basic").is_pending());
        assert!(view.begin_checkout("basic").is_none());

        // other plans are unaffected
        assert!(view.begin_checkout("pro").is_some());
        assert!(view.begin_checkout("enterprise").is_none());
    }

    #[tokio::test]
    async fn test_failed_checkout_shows_server_text_and_is_retryable() {
        let mut view = PricingView::new(PlanCatalog::standard().plans());
        let api = MockStorefront::new().with_checkout(Err(ApiError::Status {
            status: 400,
            message: Some("missing product id".into()),
        }));

        let plan = view.begin_checkout("max").unwrap();
        let result = start_checkout(&api, &plan, CheckoutOptions::default()).await;
        assert_eq!(view.finish_checkout("max", result), None);

        assert_eq!(view.button("max"), ButtonState::Failed("missing product id".into()));
        assert!(view.begin_checkout("max").is_some());
    }

    #[tokio::test]
    async fn test_successful_checkout_yields_navigation_target() {
        let mut view = view_with_basic_product();
        let api = MockStorefront::new().with_checkout_url("https://pay.example/session/abc");

        let plan = view.begin_checkout("basic").unwrap();
        let result = start_checkout(&api, &plan, CheckoutOptions::default()).await;
        let redirect = view.finish_checkout("basic", result).unwrap();

        assert_eq!(redirect.url, "https://pay.example/session/abc");
        assert_eq!(view.button("basic"), ButtonState::Ready);
    }

    #[test]
    fn test_sync_finishing_does_not_touch_pending_checkout() {
        let mut view = view_with_basic_product();
        view.begin_sync().unwrap();
        view.begin_checkout("basic").unwrap();

        view.finish_sync(SyncOutcome {
            plans: view.plans().to_vec(),
            advisory: None,
            failed: false,
        });

        assert!(view.button("basic").is_pending());
    }

    #[tokio::test]
    async fn test_failed_redirect_marks_button_failed() {
        let mut view = view_with_basic_product();
        let api = MockStorefront::new().with_checkout_url("https://pay.example/session/abc");

        let plan = view.begin_checkout("basic").unwrap();
        let result = start_checkout(&api, &plan, CheckoutOptions::default()).await;
        assert!(view.finish_checkout("basic", result).is_some());

        let err = CheckoutError::Redirect("SecurityError".into());
        assert_eq!(view.finish_checkout("basic", Err(err)), None);
        assert_eq!(
            view.button("basic"),
            ButtonState::Failed(crate::error::CHECKOUT_REDIRECT_FAILED.into())
        );
        assert!(view.begin_checkout("basic").is_some());
    }
}
