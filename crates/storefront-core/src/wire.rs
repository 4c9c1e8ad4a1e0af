//! JSON bodies exchanged between the web app and the storefront server

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider-side product record. Extra provider fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProduct {
    pub id: String,

    /// Price in minor currency units (cents)
    pub price: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Per-id failure inside a product lookup batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLookupError {
    pub id: String,
    pub message: String,
}

/// Response of `GET /api/products`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<RemoteProduct>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ProductLookupError>,
}

/// Customer identity hints forwarded to the provider
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerHint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CustomerHint {
    /// True when neither id nor email carries a value
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.id) && blank(&self.email)
    }
}

/// Body of `POST /api/checkout`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerHint>,
}

/// Successful response of `POST /api/checkout`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReply {
    #[serde(default, alias = "checkout_url")]
    pub checkout_url: Option<String>,

    /// Raw provider checkout object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<Value>,
}

/// Error body as sent by the storefront server or the payment provider
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `error`, else `message`, ignoring blank strings
    pub fn into_text(self) -> Option<String> {
        self.error
            .filter(|s| !s.trim().is_empty())
            .or(self.message.filter(|s| !s.trim().is_empty()))
    }

    /// Parse a raw body; anything unparsable yields `None`
    pub fn text_from_slice(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(body).ok().and_then(Self::into_text)
    }
}
