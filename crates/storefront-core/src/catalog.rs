//! Plan Catalog
//!
//! Static subscription plans with nominal prices. The catalog renders
//! immediately; [`crate::sync_prices`] may later replace individual price
//! records with the payment provider's figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::format_currency;

/// Billing cadence of a plan
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Yearly,
}

impl BillingCycle {
    /// Token sent as `billingCycle` in checkout payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "yearly",
        }
    }

    /// Suffix appended to price labels
    pub fn label_suffix(&self) -> &'static str {
        match self {
            Self::Yearly => "/year",
        }
    }

    /// Sub-label shown under the price
    pub fn sub_label(&self) -> &'static str {
        match self {
            Self::Yearly => "Billed annually",
        }
    }
}

/// Price shown for a plan
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub amount: Decimal,
    pub currency: String,
    pub label: String,
    pub sub_label: Option<String>,

    /// Payment provider product; `None` means checkout has to rely on the
    /// server's plan mapping
    pub product_id: Option<String>,
}

impl PriceRecord {
    /// Nominal price with a label rendered from amount and currency
    pub fn nominal(amount: Decimal, currency: impl Into<String>, cycle: BillingCycle) -> Self {
        let currency = currency.into();
        Self {
            label: price_label(amount, &currency, cycle),
            amount,
            currency,
            sub_label: Some(cycle.sub_label().into()),
            product_id: None,
        }
    }

    /// New record carrying a fresher amount and currency; sub-label and
    /// product id are kept.
    pub fn repriced(&self, amount: Decimal, currency: &str, cycle: BillingCycle) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
            label: price_label(amount, currency, cycle),
            sub_label: self.sub_label.clone(),
            product_id: self.product_id.clone(),
        }
    }
}

fn price_label(amount: Decimal, currency: &str, cycle: BillingCycle) -> String {
    format!("{} {}", format_currency(amount, currency), cycle.label_suffix())
}

/// Plan feature line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub label: String,
    /// Announced but not yet available
    pub coming_soon: bool,
}

impl Feature {
    pub fn available(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            coming_soon: false,
        }
    }

    pub fn coming_soon(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            coming_soon: true,
        }
    }
}

/// Credit allowance call-out on a plan card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditsHighlight {
    pub title: String,
    pub subtitle: String,
}

/// A purchasable subscription tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub headline: String,
    pub description: Option<String>,
    pub badge: Option<String>,
    pub emphasize: bool,
    pub credits: CreditsHighlight,
    pub features: Vec<Feature>,
    pub call_to_action: String,
    pub billing_cycle: BillingCycle,
    pub price: PriceRecord,
}

impl Plan {
    /// External product id, if one is wired up
    pub fn product_id(&self) -> Option<&str> {
        self.price.product_id.as_deref()
    }
}

/// Ordered set of plans offered on the pricing page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl PlanCatalog {
    /// Build a catalog from explicit plans
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    /// The three yearly plans, without product ids
    pub fn standard() -> Self {
        Self::new(vec![basic(), pro(), max()])
    }

    /// Attach external product ids by plan id. Blank ids are treated as
    /// absent; unknown plan ids are ignored.
    #[must_use]
    pub fn with_product_ids<I, K, V>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (plan_id, product_id) in ids {
            let product_id = product_id
                .map(Into::into)
                .map(|id: String| id.trim().to_string())
                .filter(|id| !id.is_empty());

            if let Some(plan) = self.plans.iter_mut().find(|p| p.id == plan_id.as_ref()) {
                plan.price.product_id = product_id;
            }
        }
        self
    }

    /// Plans in display order
    pub fn plans(&self) -> Vec<Plan> {
        self.plans.clone()
    }

    /// Plan ids in display order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.plans.iter().map(|p| p.id.as_str())
    }
}

fn basic() -> Plan {
    Plan {
        id: "basic".into(),
        name: "Basic".into(),
        headline: "For creators getting started".into(),
        description: Some("Yearly subscription, cancel anytime.".into()),
        badge: None,
        emphasize: false,
        credits: CreditsHighlight {
            title: "1,800 credits".into(),
            subtitle: "≈ 75 high-quality images per month".into(),
        },
        features: vec![
            Feature::available("1,800 credits per year"),
            Feature::available("75 high-quality images per month"),
            Feature::available("Standard AI models"),
            Feature::available("Standard support"),
            Feature::available("Commercial license included"),
            Feature::available("Cancel anytime"),
        ],
        call_to_action: "Get Basic".into(),
        billing_cycle: BillingCycle::Yearly,
        price: PriceRecord::nominal(Decimal::from(144), "USD", BillingCycle::Yearly),
    }
}

fn pro() -> Plan {
    Plan {
        id: "pro".into(),
        name: "Pro".into(),
        headline: "The popular choice for busy creators".into(),
        description: Some("Yearly subscription with priority support.".into()),
        badge: Some("Most popular".into()),
        emphasize: true,
        credits: CreditsHighlight {
            title: "9,600 credits".into(),
            subtitle: "≈ 400 high-quality images per month".into(),
        },
        features: vec![
            Feature::available("9,600 credits per year"),
            Feature::available("400 high-quality images per month"),
            Feature::available("Advanced models"),
            Feature::available("Priority support"),
            Feature::available("Batch generation"),
            Feature::available("Commercial license included"),
            Feature::available("Cancel anytime"),
            Feature::coming_soon("Image editing tools (coming in October)"),
        ],
        call_to_action: "Get Pro".into(),
        billing_cycle: BillingCycle::Yearly,
        price: PriceRecord::nominal(Decimal::from(234), "USD", BillingCycle::Yearly),
    }
}

fn max() -> Plan {
    Plan {
        id: "max".into(),
        name: "Max".into(),
        headline: "Built for high-volume teams".into(),
        description: Some("Fast rendering and a dedicated success manager.".into()),
        badge: None,
        emphasize: false,
        credits: CreditsHighlight {
            title: "19,200 credits".into(),
            subtitle: "≈ 800 high-quality images per month".into(),
        },
        features: vec![
            Feature::available("19,200 credits per year"),
            Feature::available("800 high-quality images per month"),
            Feature::available("Fast rendering lane"),
            Feature::available("Dedicated customer success manager"),
            Feature::available("Priority queue"),
            Feature::available("Commercial license included"),
            Feature::available("Cancel anytime"),
            Feature::coming_soon("Pro editing suite (coming in October)"),
        ],
        call_to_action: "Get Max".into(),
        billing_cycle: BillingCycle::Yearly,
        price: PriceRecord::nominal(Decimal::from(480), "USD", BillingCycle::Yearly),
    }
}
