//! Batched Product Lookup
//!
//! One provider request per id, run concurrently. Successes and per-id
//! failures are reported side by side; a bad id never fails the batch.

use std::collections::HashSet;

use futures::future::join_all;
use storefront_core::{ProductLookupError, ProductsResponse};

use crate::error::{PaymentError, Result};
use crate::provider::PaymentProvider;

/// Upper bound on distinct ids in one lookup; each id costs a provider call.
pub const MAX_LOOKUP_IDS: usize = 16;

/// Split a comma-separated id list: trimmed, non-empty, de-duplicated.
///
/// More than [`MAX_LOOKUP_IDS`] distinct ids is rejected before any provider
/// call.
pub fn parse_id_list(raw: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect();

    if ids.len() > MAX_LOOKUP_IDS {
        return Err(PaymentError::TooManyIds {
            requested: ids.len(),
            max: MAX_LOOKUP_IDS,
        });
    }
    Ok(ids)
}

/// Fetch every id from the provider and aggregate the results.
///
/// An empty id set returns an empty product list without contacting the
/// provider.
pub async fn lookup_products<P>(provider: &P, ids: &[String]) -> ProductsResponse
where
    P: PaymentProvider + ?Sized,
{
    if ids.is_empty() {
        return ProductsResponse::default();
    }

    let results = join_all(ids.iter().map(|id| async move {
        (id, provider.fetch_product(id).await)
    }))
    .await;

    let mut response = ProductsResponse::default();
    for (id, result) in results {
        match result {
            Ok(product) => response.products.push(product),
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    product_id = %id,
                    error = %e,
                    "Product lookup failed"
                );
                response.errors.push(ProductLookupError {
                    id: id.clone(),
                    message: lookup_message(id, &e),
                });
            }
        }
    }

    tracing::debug!(
        requested = ids.len(),
        found = response.products.len(),
        failed = response.errors.len(),
        "Product lookup finished"
    );

    response
}

fn lookup_message(id: &str, err: &PaymentError) -> String {
    match err {
        PaymentError::Provider {
            message: Some(message),
            ..
        } => message.clone(),
        _ => format!("Unable to fetch product {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use storefront_core::RemoteProduct;

    fn product(id: &str, price: i64) -> RemoteProduct {
        RemoteProduct {
            id: id.into(),
            price,
            currency: Some("USD".into()),
        }
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            parse_id_list(" prod_a, ,prod_b,prod_a,,").unwrap(),
            ["prod_a", "prod_b"]
        );
        assert!(parse_id_list("").unwrap().is_empty());
        assert!(parse_id_list(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_id_list_caps_distinct_ids() {
        let at_limit: Vec<String> = (0..MAX_LOOKUP_IDS).map(|i| format!("prod_{i}")).collect();
        assert_eq!(parse_id_list(&at_limit.join(",")).unwrap().len(), MAX_LOOKUP_IDS);

        // repeats do not count against the cap
        let repeated = vec!["prod_same"; MAX_LOOKUP_IDS * 4].join(",");
        assert_eq!(parse_id_list(&repeated).unwrap(), ["prod_same"]);

        let over: Vec<String> = (0..=MAX_LOOKUP_IDS).map(|i| format!("prod_{i}")).collect();
        assert_eq!(
            parse_id_list(&over.join(",")).unwrap_err(),
            PaymentError::TooManyIds {
                requested: MAX_LOOKUP_IDS + 1,
                max: MAX_LOOKUP_IDS
            }
        );
    }

    #[tokio::test]
    async fn test_empty_ids_skip_provider() {
        let provider = MockProvider::new();
        let response = lookup_products(&provider, &[]).await;

        assert!(response.products.is_empty());
        assert!(response.errors.is_empty());
        assert_eq!(provider.product_requests(), 0);
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported_per_id() {
        let provider = MockProvider::new()
            .with_product(product("prod_basic", 14400))
            .with_product_error(
                "prod_broken",
                PaymentError::Provider {
                    status: 404,
                    message: Some("Product not found".into()),
                },
            );

        let ids = vec![
            "prod_basic".to_string(),
            "prod_broken".to_string(),
            "prod_unknown".to_string(),
        ];
        let response = lookup_products(&provider, &ids).await;

        assert_eq!(provider.product_requests(), 3);
        assert_eq!(response.products, vec![product("prod_basic", 14400)]);
        assert_eq!(
            response.errors,
            vec![
                ProductLookupError {
                    id: "prod_broken".into(),
                    message: "Product not found".into(),
                },
                ProductLookupError {
                    id: "prod_unknown".into(),
                    message: "Unable to fetch product prod_unknown".into(),
                },
            ]
        );
    }
}
