//! API Client
//!
//! [`StorefrontApi`] over `reqwest`, addressed relative to the page origin.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use storefront_core::{
    ApiError, CheckoutPayload, CheckoutReply, ErrorBody, ProductsResponse, StorefrontApi,
};

/// Storefront server reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpStorefront {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStorefront {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Server at the origin the page was loaded from
    pub fn from_window() -> Self {
        Self::new(page_origin())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Origin of the current page, e.g. `https://example.com`
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: ErrorBody::text_from_slice(&body),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl StorefrontApi for HttpStorefront {
    async fn lookup_products(&self, ids: &[String]) -> Result<ProductsResponse, ApiError> {
        let response = self
            .client
            .get(self.url("/api/products"))
            .query(&[("ids", ids.join(","))])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(response).await
    }

    async fn create_checkout(&self, payload: &CheckoutPayload) -> Result<CheckoutReply, ApiError> {
        let response = self
            .client
            .post(self.url("/api/checkout"))
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpStorefront::new("https://shop.example.com/");
        assert_eq!(
            api.url("/api/checkout"),
            "https://shop.example.com/api/checkout"
        );
    }
}
