use serde::Serialize;

use crate::domain::{
    entities::{
        credit_packages::CreditPackageEntity, payment_contacts::PaymentContactEntity,
        subscription_plans::SubscriptionPlanEntity,
    },
    value_objects::{enums::tiers::Tier, purchase_selection::PurchaseSelectionRequest},
};

pub const STORE_NOTICE: &str = "After clicking \"Buy\", you will be redirected to WhatsApp. Send the message and complete payment to Admin.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StorefrontView {
    Locked {
        message: String,
    },
    Open {
        tier: Tier,
        plans: Vec<PlanCardDto>,
        packages: Vec<CreditPackageDto>,
        notice: String,
    },
}

/// A subscription plan as displayed for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanCardDto {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub price: i32,
    pub original_price: Option<i32>,
    pub features: Vec<String>,
    pub popular: bool,
}

impl PlanCardDto {
    pub fn for_tier(plan: &SubscriptionPlanEntity, tier: Tier) -> Self {
        let mut features = tier.base_features();
        features.extend(plan.features.iter().cloned());

        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            duration: plan.duration.clone(),
            price: plan.price_for(tier),
            original_price: plan.original_price_for(tier),
            features,
            popular: plan.popular,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditPackageDto {
    pub id: String,
    pub name: String,
    pub credits: i32,
    pub price: i32,
}

impl From<CreditPackageEntity> for CreditPackageDto {
    fn from(value: CreditPackageEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            credits: value.credits,
            price: value.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactOptionDto {
    pub id: String,
    pub name: String,
    pub traffic_percent: u32,
    pub is_low_traffic: bool,
}

impl ContactOptionDto {
    pub fn new(contact: &PaymentContactEntity, traffic_percent: u32, is_low_traffic: bool) -> Self {
        Self {
            id: contact.id.clone(),
            name: contact.name.clone(),
            traffic_percent,
            is_low_traffic,
        }
    }
}

/// The contact-selection prompt opened after tapping an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchasePromptDto {
    pub selection: PurchaseSelectionRequest,
    pub item_name: String,
    pub price: i32,
    pub contacts: Vec<ContactOptionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRedirectDto {
    pub redirect_url: String,
}
