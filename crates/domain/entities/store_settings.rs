use diesel::prelude::*;

use crate::{
    domain::entities::{
        credit_packages::{CreditPackageEntity, default_credit_packages},
        payment_contacts::{PaymentContactEntity, fallback_payment_contact},
        subscription_plans::SubscriptionPlanEntity,
    },
    infra::db::postgres::schema::store_settings,
};

pub const DEFAULT_PAYMENT_DISABLED_MESSAGE: &str =
    "Purchases are currently disabled by the Admin. Please check back later.";

/// Admin-owned storefront configuration. `None` means the admin never supplied
/// the value and the storefront falls back to its built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSettingsEntity {
    pub is_payment_enabled: Option<bool>,
    pub payment_disabled_message: Option<String>,
    pub packages: Option<Vec<CreditPackageEntity>>,
    pub subscription_plans: Option<Vec<SubscriptionPlanEntity>>,
    pub payment_numbers: Option<Vec<PaymentContactEntity>>,
}

impl StoreSettingsEntity {
    /// Only an explicit `false` locks the store.
    pub fn is_locked(&self) -> bool {
        self.is_payment_enabled == Some(false)
    }

    pub fn locked_message(&self) -> String {
        self.payment_disabled_message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(DEFAULT_PAYMENT_DISABLED_MESSAGE)
            .to_string()
    }

    pub fn packages_or_default(&self) -> Vec<CreditPackageEntity> {
        self.packages
            .clone()
            .unwrap_or_else(default_credit_packages)
    }

    pub fn subscription_plans_or_empty(&self) -> Vec<SubscriptionPlanEntity> {
        self.subscription_plans.clone().unwrap_or_default()
    }

    pub fn payment_contacts_or_fallback(&self) -> Vec<PaymentContactEntity> {
        match &self.payment_numbers {
            Some(contacts) => contacts.clone(),
            None => vec![fallback_payment_contact()],
        }
    }
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = store_settings)]
pub struct StoreSettingsRow {
    pub id: i32,
    pub is_payment_enabled: Option<bool>,
    pub payment_disabled_message: Option<String>,
}
