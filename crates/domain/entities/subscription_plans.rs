use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    domain::value_objects::enums::tiers::Tier,
    infra::db::postgres::schema::subscription_plans,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlanEntity {
    pub id: String,
    pub name: String,
    /// Human label such as "1 Month" or "Lifetime".
    pub duration: String,
    pub basic_price: i32,
    pub basic_original_price: Option<i32>,
    pub ultra_price: i32,
    pub ultra_original_price: Option<i32>,
    pub features: Vec<String>,
    pub popular: bool,
}

impl SubscriptionPlanEntity {
    pub fn price_for(&self, tier: Tier) -> i32 {
        match tier {
            Tier::Basic => self.basic_price,
            Tier::Ultra => self.ultra_price,
        }
    }

    pub fn original_price_for(&self, tier: Tier) -> Option<i32> {
        match tier {
            Tier::Basic => self.basic_original_price,
            Tier::Ultra => self.ultra_original_price,
        }
    }
}

/// Raw row used for Diesel queries. Features stay as JSON and are parsed into a string list.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription_plans)]
pub struct SubscriptionPlanRow {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub basic_price: i32,
    pub basic_original_price: Option<i32>,
    pub ultra_price: i32,
    pub ultra_original_price: Option<i32>,
    pub features: serde_json::Value,
    pub popular: bool,
    pub sort_order: i32,
}

impl From<SubscriptionPlanRow> for SubscriptionPlanEntity {
    fn from(value: SubscriptionPlanRow) -> Self {
        let features = serde_json::from_value(value.features).unwrap_or_default();

        Self {
            id: value.id,
            name: value.name,
            duration: value.duration,
            basic_price: value.basic_price,
            basic_original_price: value.basic_original_price,
            ultra_price: value.ultra_price,
            ultra_original_price: value.ultra_original_price,
            features,
            popular: value.popular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row(features: serde_json::Value) -> SubscriptionPlanRow {
        SubscriptionPlanRow {
            id: "monthly".to_string(),
            name: "Monthly".to_string(),
            duration: "1 Month".to_string(),
            basic_price: 99,
            basic_original_price: Some(199),
            ultra_price: 199,
            ultra_original_price: None,
            features,
            popular: true,
            sort_order: 0,
        }
    }

    #[test]
    fn row_features_are_parsed_from_json_array() {
        let plan = SubscriptionPlanEntity::from(sample_row(json!(["Doubt Support"])));
        assert_eq!(plan.features, vec!["Doubt Support".to_string()]);
    }

    #[test]
    fn malformed_features_fall_back_to_empty() {
        let plan = SubscriptionPlanEntity::from(sample_row(json!({"not": "a list"})));
        assert!(plan.features.is_empty());
    }

    #[test]
    fn prices_follow_tier() {
        let plan = SubscriptionPlanEntity::from(sample_row(json!([])));

        assert_eq!(plan.price_for(Tier::Basic), 99);
        assert_eq!(plan.price_for(Tier::Ultra), 199);
        assert_eq!(plan.original_price_for(Tier::Basic), Some(199));
        assert_eq!(plan.original_price_for(Tier::Ultra), None);
    }
}
