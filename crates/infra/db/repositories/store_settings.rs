use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::domain;
use crate::infra::db::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{credit_packages, payment_contacts, store_settings, subscription_plans},
};
use domain::{
    entities::{
        credit_packages::{CreditPackageEntity, CreditPackageRow},
        payment_contacts::{PaymentContactEntity, PaymentContactRow},
        store_settings::{StoreSettingsEntity, StoreSettingsRow},
        subscription_plans::{SubscriptionPlanEntity, SubscriptionPlanRow},
    },
    repositories::store_settings::StoreSettingsRepository,
};

const SETTINGS_ROW_ID: i32 = 1;

pub struct StoreSettingsPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl StoreSettingsPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// An empty catalog table means the admin never supplied that list.
fn supplied<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

#[async_trait]
impl StoreSettingsRepository for StoreSettingsPostgres {
    async fn load_settings(&self) -> Result<StoreSettingsEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let settings_row = store_settings::table
            .filter(store_settings::id.eq(SETTINGS_ROW_ID))
            .select(StoreSettingsRow::as_select())
            .first::<StoreSettingsRow>(&mut conn)
            .optional()?;

        let packages = credit_packages::table
            .order((credit_packages::sort_order.asc(), credit_packages::id.asc()))
            .select(CreditPackageRow::as_select())
            .load::<CreditPackageRow>(&mut conn)?
            .into_iter()
            .map(CreditPackageEntity::from)
            .collect();

        let plans = subscription_plans::table
            .order((
                subscription_plans::sort_order.asc(),
                subscription_plans::id.asc(),
            ))
            .select(SubscriptionPlanRow::as_select())
            .load::<SubscriptionPlanRow>(&mut conn)?
            .into_iter()
            .map(SubscriptionPlanEntity::from)
            .collect();

        let contacts = payment_contacts::table
            .order((payment_contacts::sort_order.asc(), payment_contacts::id.asc()))
            .select(PaymentContactRow::as_select())
            .load::<PaymentContactRow>(&mut conn)?
            .into_iter()
            .map(PaymentContactEntity::from)
            .collect();

        let (is_payment_enabled, payment_disabled_message) = match settings_row {
            Some(row) => (row.is_payment_enabled, row.payment_disabled_message),
            None => (None, None),
        };

        Ok(StoreSettingsEntity {
            is_payment_enabled,
            payment_disabled_message,
            packages: supplied(packages),
            subscription_plans: supplied(plans),
            payment_numbers: supplied(contacts),
        })
    }
}
