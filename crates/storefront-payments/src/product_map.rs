//! Plan → Product Mapping
//!
//! Server-side fallback used when the browser's copy of a plan carries no
//! product id.

use std::collections::BTreeMap;

/// Outcome of resolving a plan id
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductResolution {
    Resolved(String),
    /// Plan unknown or its product id not configured
    Unresolved,
}

/// Fixed plan id → provider product id mapping
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductIdMap {
    entries: BTreeMap<String, String>,
}

impl ProductIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping; blank product ids are ignored
    #[must_use]
    pub fn with_product(
        mut self,
        plan_id: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Self {
        let product_id = product_id.into();
        if !product_id.trim().is_empty() {
            self.entries.insert(plan_id.into(), product_id.trim().to_string());
        }
        self
    }

    /// Read `CREEM_PRODUCT_<PLAN>_YEARLY` for each plan id
    pub fn from_env<'a>(plan_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_lookup(plan_ids, |key| std::env::var(key).ok())
    }

    fn from_lookup<'a>(
        plan_ids: impl IntoIterator<Item = &'a str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        plan_ids.into_iter().fold(Self::new(), |map, plan_id| {
            match lookup(&env_key(plan_id)) {
                Some(product_id) => map.with_product(plan_id, product_id),
                None => {
                    tracing::warn!(
                        plan = %plan_id,
                        key = %env_key(plan_id),
                        "No product id configured for plan"
                    );
                    map
                }
            }
        })
    }

    pub fn resolve(&self, plan_id: &str) -> ProductResolution {
        self.entries
            .get(plan_id)
            .map_or(ProductResolution::Unresolved, |id| ProductResolution::Resolved(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Environment variable holding the product id of a yearly plan
pub(crate) fn env_key(plan_id: &str) -> String {
    format!("CREEM_PRODUCT_{}_YEARLY", plan_id.to_ascii_uppercase().replace('-', "_"))
}
