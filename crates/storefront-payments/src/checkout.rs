//! Hosted Checkout Sessions
//!
//! Builds the provider request from a browser [`CheckoutPayload`] and makes
//! the single provider call.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use storefront_core::{CheckoutPayload, CustomerHint};

use crate::error::{PaymentError, Result};
use crate::product_map::{ProductIdMap, ProductResolution};
use crate::provider::PaymentProvider;

/// Body of the provider's `POST /v1/checkouts`
///
/// Optional fields are left out of the JSON entirely when absent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutSessionRequest {
    pub product_id: String,
    pub request_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerHint>,
}

/// Result of creating a checkout session
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutSession {
    /// URL to redirect user to
    pub checkout_url: String,

    pub product_id: String,
    pub request_id: String,

    /// Provider response body
    pub raw: Value,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve the product and assemble the provider request.
///
/// Resolution order: the payload's `productId`, then the plan mapping. Fails
/// without side effects when neither yields a product.
pub fn build_checkout_request(
    payload: &CheckoutPayload,
    products: &ProductIdMap,
    now: DateTime<Utc>,
) -> Result<CheckoutSessionRequest> {
    let direct = non_blank(payload.product_id.as_deref());
    let plan_id = non_blank(payload.plan_id.as_deref());

    let product_id = match (direct, plan_id) {
        (Some(product_id), _) => product_id.to_string(),
        (None, Some(plan_id)) => match products.resolve(plan_id) {
            ProductResolution::Resolved(product_id) => product_id,
            ProductResolution::Unresolved => {
                return Err(PaymentError::UnresolvedProduct {
                    plan_id: Some(plan_id.to_string()),
                });
            }
        },
        (None, None) => return Err(PaymentError::MissingTarget),
    };

    let request_id = non_blank(payload.request_id.as_deref()).map_or_else(
        || {
            format!(
                "checkout-{}-{}-{}",
                plan_id.unwrap_or(product_id.as_str()),
                non_blank(payload.billing_cycle.as_deref()).unwrap_or("single"),
                now.timestamp_millis()
            )
        },
        str::to_string,
    );

    Ok(CheckoutSessionRequest {
        product_id,
        request_id,
        units: payload.units.filter(|u| *u > 0),
        discount_code: non_blank(payload.discount_code.as_deref()).map(str::to_string),
        success_url: non_blank(payload.success_url.as_deref()).map(str::to_string),
        metadata: payload.metadata.clone().filter(|m| !m.is_empty()),
        customer: payload.customer.clone().filter(|c| !c.is_empty()),
    })
}

/// Create a hosted checkout session with exactly one provider call.
pub async fn create_checkout_session<P>(
    provider: &P,
    payload: &CheckoutPayload,
    products: &ProductIdMap,
    now: DateTime<Utc>,
) -> Result<CheckoutSession>
where
    P: PaymentProvider + ?Sized,
{
    let request = build_checkout_request(payload, products, now)?;

    tracing::info!(
        provider = provider.name(),
        product_id = %request.product_id,
        request_id = %request.request_id,
        "Creating checkout session"
    );

    let checkout = provider.create_checkout(&request).await?;

    let checkout_url = checkout
        .checkout_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(PaymentError::MissingCheckoutUrl)?;

    Ok(CheckoutSession {
        checkout_url,
        product_id: request.product_id,
        request_id: request.request_id,
        raw: checkout.raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn build(body: &CheckoutPayload) -> Result<CheckoutSessionRequest> {
        build_checkout_request(body, &products(), now())
    }

    async fn create(provider: &MockProvider, body: &CheckoutPayload) -> Result<CheckoutSession> {
        create_checkout_session(provider, body, &products(), now()).await
    }

    fn products() -> ProductIdMap {
        ProductIdMap::new()
            .with_product("basic", "prod_basic_env")
            .with_product("pro", "prod_pro_env")
    }

    fn payload(plan_id: Option<&str>, product_id: Option<&str>) -> CheckoutPayload {
        CheckoutPayload {
            plan_id: plan_id.map(Into::into),
            product_id: product_id.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn test_direct_product_id_wins() {
        let request = build(&payload(Some("basic"), Some("prod_direct"))).unwrap();
        assert_eq!(request.product_id, "prod_direct");
    }

    #[test]
    fn test_plan_mapping_is_fallback() {
        let request = build(&payload(Some("pro"), None)).unwrap();
        assert_eq!(request.product_id, "prod_pro_env");
    }

    #[test]
    fn test_blank_product_id_falls_back_to_mapping() {
        let request = build(&payload(Some("basic"), Some("  "))).unwrap();
        assert_eq!(request.product_id, "prod_basic_env");
    }

    #[test]
    fn test_unresolved_plan_fails() {
        let err = build(&payload(Some("max"), None)).unwrap_err();
        assert_eq!(
            err,
            PaymentError::UnresolvedProduct {
                plan_id: Some("max".into())
            }
        );
    }

    #[test]
    fn test_missing_target_fails() {
        let err = build(&payload(None, None)).unwrap_err();
        assert_eq!(err, PaymentError::MissingTarget);
    }

    #[test]
    fn test_request_id_synthesized_when_absent() {
        let mut body = payload(Some("basic"), None);
        body.billing_cycle = Some("yearly".into());

        let request = build(&body).unwrap();
        assert_eq!(
            request.request_id,
            format!("checkout-basic-yearly-{}", now().timestamp_millis())
        );

        let request = build(&payload(None, Some("prod_x"))).unwrap();
        assert_eq!(
            request.request_id,
            format!("checkout-prod_x-single-{}", now().timestamp_millis())
        );
    }

    #[test]
    fn test_caller_request_id_is_kept() {
        let mut body = payload(Some("basic"), None);
        body.request_id = Some("basic-yearly-42-abcd1234".into());

        let request = build(&body).unwrap();
        assert_eq!(request.request_id, "basic-yearly-42-abcd1234");
    }

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let mut body = payload(Some("basic"), None);
        body.request_id = Some("r1".into());
        body.units = Some(0);
        body.discount_code = Some(String::new());
        body.metadata = Some(Map::new());
        body.customer = Some(CustomerHint::default());

        let request = build(&body).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value, json!({ "product_id": "prod_basic_env", "request_id": "r1" }));
    }

    #[test]
    fn test_present_optionals_are_forwarded() {
        let mut body = payload(Some("basic"), None);
        body.request_id = Some("r1".into());
        body.units = Some(2);
        body.discount_code = Some("LAUNCH10".into());
        body.success_url = Some("https://banana.example/welcome".into());
        body.metadata = Some(json!({ "source": "pricing" }).as_object().unwrap().clone());
        body.customer = Some(CustomerHint {
            id: None,
            email: Some("user@example.com".into()),
        });

        let value = serde_json::to_value(build(&body).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "product_id": "prod_basic_env",
                "request_id": "r1",
                "units": 2,
                "discount_code": "LAUNCH10",
                "success_url": "https://banana.example/welcome",
                "metadata": { "source": "pricing" },
                "customer": { "email": "user@example.com" }
            })
        );
    }

    #[tokio::test]
    async fn test_session_created_with_one_call() {
        let provider = MockProvider::new().with_checkout_url("https://pay.example/session/abc");

        let session = create(&provider, &payload(Some("basic"), None)).await.unwrap();

        assert_eq!(session.checkout_url, "https://pay.example/session/abc");
        assert_eq!(provider.checkout_requests().len(), 1);
        assert_eq!(provider.checkout_requests()[0].product_id, "prod_basic_env");
    }

    #[tokio::test]
    async fn test_unresolved_product_never_reaches_provider() {
        let provider = MockProvider::new().with_checkout_url("https://pay.example/session/abc");

        let err = create(&provider, &payload(Some("max"), None)).await.unwrap_err();

        assert!(matches!(err, PaymentError::UnresolvedProduct { .. }));
        assert!(provider.checkout_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_url_from_provider() {
        let provider = MockProvider::new();

        let err = create(&provider, &payload(Some("basic"), None)).await.unwrap_err();

        assert_eq!(err, PaymentError::MissingCheckoutUrl);
    }
}
