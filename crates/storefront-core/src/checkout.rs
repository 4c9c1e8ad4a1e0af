//! Checkout Session Initiator (browser side)
//!
//! Turns a plan selection into one `POST /api/checkout` and hands back the
//! hosted checkout URL to navigate to. Product id resolution beyond the
//! plan's own id happens on the server.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::api::StorefrontApi;
use crate::catalog::Plan;
use crate::error::CheckoutError;
use crate::wire::{CheckoutPayload, CustomerHint};

/// Optional extras forwarded with a checkout
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckoutOptions {
    pub success_url: Option<String>,
    pub discount_code: Option<String>,
    pub units: Option<u32>,
    pub metadata: Option<Map<String, Value>>,
    pub customer: Option<CustomerHint>,
}

/// Where the browser should go next
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub url: String,
}

/// Request token for one checkout attempt: `<plan>-<cycle>-<millis>-<random>`.
///
/// The random suffix keeps tokens distinct for clicks within the same
/// millisecond. The server does not de-duplicate on it.
pub fn request_token(plan: &Plan, now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}-{}",
        plan.id,
        plan.billing_cycle.as_str(),
        now.timestamp_millis(),
        &suffix[..8]
    )
}

/// Payload for `plan`; absent options stay absent on the wire.
pub fn checkout_payload(
    plan: &Plan,
    options: CheckoutOptions,
    now: DateTime<Utc>,
) -> CheckoutPayload {
    CheckoutPayload {
        product_id: plan.product_id().map(str::to_string),
        plan_id: Some(plan.id.clone()),
        request_id: Some(request_token(plan, now)),
        billing_cycle: Some(plan.billing_cycle.as_str().into()),
        units: options.units.filter(|u| *u > 0),
        discount_code: non_blank(options.discount_code),
        success_url: non_blank(options.success_url),
        metadata: options.metadata.filter(|m| !m.is_empty()),
        customer: options.customer.filter(|c| !c.is_empty()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create a checkout session for `plan` and return the URL to redirect to.
///
/// Sends exactly one request; never retries.
pub async fn start_checkout<A>(
    api: &A,
    plan: &Plan,
    options: CheckoutOptions,
) -> Result<CheckoutRedirect, CheckoutError>
where
    A: StorefrontApi + ?Sized,
{
    let payload = checkout_payload(plan, options, Utc::now());

    tracing::info!(
        plan = %plan.id,
        product_id = ?payload.product_id,
        request_id = ?payload.request_id,
        "Starting checkout"
    );

    let reply = api.create_checkout(&payload).await.map_err(|e| {
        tracing::warn!(plan = %plan.id, error = %e, "Checkout request failed");
        CheckoutError::from(e)
    })?;

    match reply.checkout_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => Ok(CheckoutRedirect { url }),
        None => {
            tracing::warn!(plan = %plan.id, "Checkout response carried no URL");
            Err(CheckoutError::MissingCheckoutUrl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanCatalog;
    use crate::error::{ApiError, CHECKOUT_LINK_MISSING, CHECKOUT_UNAVAILABLE};
    use crate::mock::MockStorefront;
    use crate::wire::CheckoutReply;
    use chrono::TimeZone;

    fn plan(id: &str, product_id: Option<&str>) -> Plan {
        PlanCatalog::standard()
            .with_product_ids([(id, product_id)])
            .plans()
            .into_iter()
            .find(|p| p.id == id)
            .unwrap()
    }

    #[test]
    fn test_request_token_shape() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let token = request_token(&plan("basic", None), now);

        let prefix = format!("basic-yearly-{}-", now.timestamp_millis());
        assert!(token.starts_with(&prefix));
        assert_eq!(token.len(), prefix.len() + 8);
    }

    #[test]
    fn test_payload_drops_empty_options() {
        let options = CheckoutOptions {
            success_url: Some("  ".into()),
            discount_code: Some(String::new()),
            units: Some(0),
            metadata: Some(Map::new()),
            customer: Some(CustomerHint::default()),
        };

        let payload = checkout_payload(&plan("pro", Some("prod_pro")), options, Utc::now());

        assert_eq!(payload.product_id.as_deref(), Some("prod_pro"));
        assert_eq!(payload.plan_id.as_deref(), Some("pro"));
        assert_eq!(payload.billing_cycle.as_deref(), Some("yearly"));
        assert_eq!(payload.units, None);
        assert_eq!(payload.discount_code, None);
        assert_eq!(payload.success_url, None);
        assert_eq!(payload.metadata, None);
        assert_eq!(payload.customer, None);
    }

    #[tokio::test]
    async fn test_success_returns_exact_url() {
        let api = MockStorefront::new().with_checkout_url("https://pay.example/session/abc");

        let basic = plan("basic", Some("prod_basic"));
        let redirect = start_checkout(&api, &basic, CheckoutOptions::default())
            .await
            .unwrap();

        assert_eq!(redirect.url, "https://pay.example/session/abc");

        let calls = api.checkout_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].product_id.as_deref(), Some("prod_basic"));
        assert!(calls[0].request_id.as_deref().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_each_attempt_gets_a_fresh_token() {
        let api = MockStorefront::new().with_checkout_url("https://pay.example/s");
        let basic = plan("basic", Some("prod_basic"));

        start_checkout(&api, &basic, CheckoutOptions::default()).await.unwrap();
        start_checkout(&api, &basic, CheckoutOptions::default()).await.unwrap();

        let calls = api.checkout_calls();
        assert_eq!(calls.len(), 2);
        assert_ne!(calls[0].request_id, calls[1].request_id);
    }

    #[tokio::test]
    async fn test_plan_without_product_id_still_sends_plan_id() {
        let api = MockStorefront::new().with_checkout(Err(ApiError::Status {
            status: 400,
            message: Some("missing product id".into()),
        }));

        let err = start_checkout(&api, &plan("max", None), CheckoutOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "missing product id");
        let calls = api.checkout_calls();
        assert_eq!(calls[0].product_id, None);
        assert_eq!(calls[0].plan_id.as_deref(), Some("max"));
    }

    #[tokio::test]
    async fn test_missing_url_is_an_error() {
        let api = MockStorefront::new().with_checkout(Ok(CheckoutReply::default()));

        let err = start_checkout(&api, &plan("pro", None), CheckoutOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::MissingCheckoutUrl);
        assert_eq!(err.user_message(), CHECKOUT_LINK_MISSING);
    }

    #[tokio::test]
    async fn test_status_without_message_is_generic() {
        let api = MockStorefront::new().with_checkout(Err(ApiError::Status {
            status: 502,
            message: None,
        }));

        let err = start_checkout(&api, &plan("pro", None), CheckoutOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), CHECKOUT_UNAVAILABLE);
    }
}
