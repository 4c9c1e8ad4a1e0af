//! Provider Configuration

use std::fmt;

use crate::error::{PaymentError, Result};

/// Default payment provider API base
pub const DEFAULT_API_BASE: &str = "https://api.creem.io";

/// Credentials and endpoint of the payment provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// Secret API key, sent as `x-api-key`
    pub api_key: String,

    /// API base URL without trailing slash
    pub base_url: String,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// `CREEM_API_KEY` is required; `CREEM_API_BASE` defaults to
    /// [`DEFAULT_API_BASE`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("CREEM_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PaymentError::Config("CREEM_API_KEY is missing on the server.".into()))?;
        let base_url = lookup("CREEM_API_BASE")
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());

        Ok(Self::new(api_key.trim(), base_url.trim()))
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
