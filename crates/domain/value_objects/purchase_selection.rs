use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{credit_packages::CreditPackageEntity, subscription_plans::SubscriptionPlanEntity},
    value_objects::enums::tiers::Tier,
};

/// What the client tapped, by id. Prices are never taken from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PurchaseSelectionRequest {
    Plan {
        id: String,
        #[serde(default)]
        tier: Tier,
    },
    Package {
        id: String,
    },
}

/// A selection resolved against the current catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseSelection {
    Plan {
        plan: SubscriptionPlanEntity,
        tier: Tier,
    },
    Package(CreditPackageEntity),
}

impl PurchaseSelection {
    pub fn item_id(&self) -> &str {
        match self {
            PurchaseSelection::Plan { plan, .. } => &plan.id,
            PurchaseSelection::Package(package) => &package.id,
        }
    }

    pub fn item_name(&self) -> &str {
        match self {
            PurchaseSelection::Plan { plan, .. } => &plan.name,
            PurchaseSelection::Package(package) => &package.name,
        }
    }

    /// Only subscription plans carry a tier.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            PurchaseSelection::Plan { tier, .. } => Some(*tier),
            PurchaseSelection::Package(_) => None,
        }
    }

    pub fn price(&self) -> i32 {
        match self {
            PurchaseSelection::Plan { plan, tier } => plan.price_for(*tier),
            PurchaseSelection::Package(package) => package.price,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            PurchaseSelection::Plan { tier, .. } => tier.purchase_summary().to_string(),
            PurchaseSelection::Package(package) => format!("{} Credits", package.credits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> SubscriptionPlanEntity {
        SubscriptionPlanEntity {
            id: "yearly".to_string(),
            name: "Yearly".to_string(),
            duration: "12 Months".to_string(),
            basic_price: 499,
            basic_original_price: None,
            ultra_price: 999,
            ultra_original_price: Some(1499),
            features: vec![],
            popular: false,
        }
    }

    #[test]
    fn plan_request_defaults_to_basic_tier() {
        let request: PurchaseSelectionRequest =
            serde_json::from_str(r#"{"kind":"plan","id":"yearly"}"#).unwrap();

        assert_eq!(
            request,
            PurchaseSelectionRequest::Plan {
                id: "yearly".to_string(),
                tier: Tier::Basic,
            }
        );
    }

    #[test]
    fn package_request_is_tagged_by_kind() {
        let request: PurchaseSelectionRequest =
            serde_json::from_str(r#"{"kind":"package","id":"pkg-1"}"#).unwrap();

        assert_eq!(
            request,
            PurchaseSelectionRequest::Package {
                id: "pkg-1".to_string()
            }
        );
    }

    #[test]
    fn plan_selection_prices_by_tier() {
        let basic = PurchaseSelection::Plan {
            plan: sample_plan(),
            tier: Tier::Basic,
        };
        let ultra = PurchaseSelection::Plan {
            plan: sample_plan(),
            tier: Tier::Ultra,
        };

        assert_eq!(basic.price(), 499);
        assert_eq!(basic.summary(), "MCQ + Notes");
        assert_eq!(ultra.price(), 999);
        assert_eq!(ultra.summary(), "PDF + Videos");
        assert_eq!(ultra.tier(), Some(Tier::Ultra));
    }

    #[test]
    fn package_selection_summarizes_credits() {
        let selection = PurchaseSelection::Package(CreditPackageEntity {
            id: "pkg-3".to_string(),
            name: "500 Credits".to_string(),
            credits: 500,
            price: 50,
        });

        assert_eq!(selection.tier(), None);
        assert_eq!(selection.price(), 50);
        assert_eq!(selection.summary(), "500 Credits");
        assert_eq!(selection.item_name(), "500 Credits");
    }
}
