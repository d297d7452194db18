//! Plan registry
//!
//! Display names, prices and Stripe price references for the purchasable
//! plans. Built once from configuration and never mutated.

use std::collections::HashMap;

use serde::Serialize;

use roomvibe_types::Plan;

/// Environment variable holding the Stripe price/product reference for a plan
const fn price_env_key(plan: Plan) -> Option<&'static str> {
    match plan {
        Plan::User => Some("STRIPE_PRICE_USER"),
        Plan::Artist => Some("STRIPE_PRICE_ARTIST"),
        Plan::Designer => Some("STRIPE_PRICE_DESIGNER"),
        Plan::Gallery => Some("STRIPE_PRICE_GALLERY"),
        Plan::AllAccess => Some("STRIPE_PRICE_ALL_ACCESS"),
        Plan::Admin => None,
    }
}

/// One purchasable plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub plan: Plan,
    pub name: &'static str,
    pub monthly_price_cents: u32,
    /// Stripe price or product reference, if configured
    pub stripe_price: Option<String>,
}

/// Immutable registry of purchasable plans
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    entries: Vec<PlanEntry>,
    by_price: HashMap<String, Plan>,
}

impl PlanRegistry {
    /// Build the registry, reading Stripe references through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let entries: Vec<PlanEntry> = Plan::PURCHASABLE
            .into_iter()
            .map(|plan| PlanEntry {
                plan,
                name: plan.display_name(),
                monthly_price_cents: plan.monthly_price_cents().unwrap_or(0),
                stripe_price: price_env_key(plan).and_then(|key| lookup(key)),
            })
            .collect();

        let by_price = entries
            .iter()
            .filter_map(|e| e.stripe_price.clone().map(|price| (price, e.plan)))
            .collect();

        Self { entries, by_price }
    }

    /// Build the registry from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(crate::config::process_env)
    }

    /// Purchasable plans, lowest tier first
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Entry for a plan. `None` for plans that are not sold.
    pub fn entry(&self, plan: Plan) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.plan == plan)
    }

    /// Reverse lookup from a Stripe price reference
    pub fn plan_for_price(&self, price: &str) -> Option<Plan> {
        self.by_price.get(price).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::lookup_from;

    #[test]
    fn test_registry_lists_purchasable_plans_in_order() {
        let registry = PlanRegistry::from_lookup(|_| None);
        let plans: Vec<Plan> = registry.entries().iter().map(|e| e.plan).collect();
        assert_eq!(plans, Plan::PURCHASABLE.to_vec());
        assert!(registry.entry(Plan::Admin).is_none());
    }

    #[test]
    fn test_prices_and_names() {
        let registry = PlanRegistry::from_lookup(|_| None);
        let designer = registry.entry(Plan::Designer).unwrap();
        assert_eq!(designer.name, "Designer");
        assert_eq!(designer.monthly_price_cents, 2_900);
        assert_eq!(designer.stripe_price, None);
    }

    #[test]
    fn test_price_reverse_lookup() {
        let registry = PlanRegistry::from_lookup(lookup_from(&[
            ("STRIPE_PRICE_ARTIST", "price_artist_1"),
            ("STRIPE_PRICE_ALL_ACCESS", "price_all_1"),
        ]));

        assert_eq!(registry.plan_for_price("price_artist_1"), Some(Plan::Artist));
        assert_eq!(registry.plan_for_price("price_all_1"), Some(Plan::AllAccess));
        assert_eq!(registry.plan_for_price("price_unknown"), None);
        assert_eq!(
            registry.entry(Plan::Artist).and_then(|e| e.stripe_price.as_deref()),
            Some("price_artist_1")
        );
    }
}
