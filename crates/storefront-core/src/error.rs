//! Error Types

use thiserror::Error;

/// Shown when a checkout fails without a usable server message.
pub const CHECKOUT_UNAVAILABLE: &str =
    "Checkout is temporarily unavailable, please try again later.";

/// Shown when the server accepted the checkout but returned no link.
pub const CHECKOUT_LINK_MISSING: &str = "Checkout link is missing, please contact support.";

/// Shown when the browser refused to open the checkout link.
pub const CHECKOUT_REDIRECT_FAILED: &str =
    "Unable to open the checkout page, please try again.";

/// Failure talking to the storefront server
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        /// `error` (or `message`) field of the response body, if any
        message: Option<String>,
    },

    /// Request never completed
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Error text supplied by the server, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}

/// Checkout attempt failure, always reducible to one user-facing string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Server refused the checkout and said why
    #[error("checkout rejected: {0}")]
    Rejected(String),

    /// Server accepted the checkout but sent no checkout URL
    #[error("checkout response did not include a checkout URL")]
    MissingCheckoutUrl,

    /// Transport, decode, or status failure without a server message
    #[error("checkout unavailable: {0}")]
    Unavailable(ApiError),

    /// Checkout link received but the page could not navigate to it
    #[error("redirect to checkout failed: {0}")]
    Redirect(String),
}

impl CheckoutError {
    /// Message to show inline next to the plan's button
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::MissingCheckoutUrl => CHECKOUT_LINK_MISSING.into(),
            Self::Unavailable(_) => CHECKOUT_UNAVAILABLE.into(),
            Self::Redirect(_) => CHECKOUT_REDIRECT_FAILED.into(),
        }
    }
}

impl From<ApiError> for CheckoutError {
    fn from(err: ApiError) -> Self {
        match err.server_message() {
            Some(message) => Self::Rejected(message.to_string()),
            None => Self::Unavailable(err),
        }
    }
}
