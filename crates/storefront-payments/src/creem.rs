//! Creem API client
//!
//! Thin `reqwest` wrapper over the two provider endpoints the storefront
//! needs: product lookup and checkout creation.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use storefront_core::{ErrorBody, RemoteProduct};

use crate::checkout::CheckoutSessionRequest;
use crate::config::ProviderConfig;
use crate::error::{PaymentError, Result};
use crate::provider::{PaymentProvider, ProviderCheckout};

const API_KEY_HEADER: &str = "x-api-key";

/// Creem client wrapper
pub struct CreemClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl CreemClient {
    /// Create a new client
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ProviderConfig::from_env()?))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Read the body; non-success statuses become `PaymentError::Provider`
    async fn read_body(response: Response) -> Result<(StatusCode, Vec<u8>)> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                message: ErrorBody::text_from_slice(&body),
            });
        }

        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl PaymentProvider for CreemClient {
    async fn fetch_product(&self, product_id: &str) -> Result<RemoteProduct> {
        let response = self
            .http
            .get(self.url("/v1/products"))
            .query(&[("product_id", product_id)])
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let (_, body) = Self::read_body(response).await?;

        serde_json::from_slice(&body).map_err(|e| PaymentError::Decode(e.to_string()))
    }

    async fn create_checkout(&self, request: &CheckoutSessionRequest) -> Result<ProviderCheckout> {
        let response = self
            .http
            .post(self.url("/v1/checkouts"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let (status, body) = Self::read_body(response).await?;
        tracing::debug!(status = %status, "Provider checkout response");

        let raw: Value =
            serde_json::from_slice(&body).map_err(|e| PaymentError::Decode(e.to_string()))?;
        let checkout_url = raw
            .get("checkout_url")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(ProviderCheckout { checkout_url, raw })
    }

    fn name(&self) -> &str {
        "Creem"
    }
}
