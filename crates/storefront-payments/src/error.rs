//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Server-side misconfiguration (missing credential)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Checkout payload named neither a product nor a plan
    #[error("Checkout target missing: productId or planId is required")]
    MissingTarget,

    /// Product lookup asked for more ids than one request may fan out to
    #[error("Too many product ids: {requested} requested, at most {max}")]
    TooManyIds { requested: usize, max: usize },

    /// Plan has no product id in the server mapping
    #[error("No product configured for plan {plan_id:?}")]
    UnresolvedProduct { plan_id: Option<String> },

    /// Provider answered with a non-success status
    #[error("Provider returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Provider { status: u16, message: Option<String> },

    /// Provider accepted the checkout but sent no URL
    #[error("Provider response has no checkout URL")]
    MissingCheckoutUrl,

    /// Request to the provider did not complete
    #[error("Provider transport error: {0}")]
    Transport(String),

    /// Provider body could not be decoded
    #[error("Provider response parse error: {0}")]
    Decode(String),
}

impl PaymentError {
    /// HTTP status to answer the browser with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::MissingTarget | Self::UnresolvedProduct { .. } | Self::TooManyIds { .. } => 400,
            Self::Provider { status, .. } if (400..600).contains(status) => *status,
            Self::Provider { .. }
            | Self::MissingCheckoutUrl
            | Self::Transport(_)
            | Self::Decode(_) => 502,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "PAYMENTS_DISABLED",
            Self::MissingTarget => "MISSING_TARGET",
            Self::UnresolvedProduct { .. } => "MISSING_PRODUCT",
            Self::TooManyIds { .. } => "TOO_MANY_IDS",
            Self::Provider { .. } => "PROVIDER_ERROR",
            Self::MissingCheckoutUrl => "MISSING_CHECKOUT_URL",
            Self::Transport(_) | Self::Decode(_) => "PROVIDER_UNAVAILABLE",
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(diagnostic) => diagnostic.clone(),
            Self::MissingTarget => {
                "productId or planId is required to create a checkout session.".into()
            }
            Self::UnresolvedProduct { .. } => {
                "Missing payment product id; configure the product identifier for this plan.".into()
            }
            Self::TooManyIds { max, .. } => {
                format!("At most {max} product ids can be looked up at once.")
            }
            Self::Provider { message, .. } => message
                .clone()
                .unwrap_or_else(|| "Checkout creation failed".into()),
            Self::MissingCheckoutUrl => "Payment provider did not return a checkout URL.".into(),
            Self::Transport(_) => "Payment provider is unreachable, please try again later.".into(),
            Self::Decode(_) => "Payment provider returned an unreadable response.".into(),
        }
    }
}
