use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::domain::repositories::payment_contacts::PaymentContactClickRecorder;
use crate::infra::db::postgres::{postgres_connection::PgPoolSquad, schema::payment_contacts};

pub struct PaymentContactPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentContactPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentContactClickRecorder for PaymentContactPostgres {
    async fn record_click(&self, contact_id: String) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Single statement so concurrent checkouts never lose an increment.
        let updated = diesel::update(payment_contacts::table)
            .filter(payment_contacts::id.eq(&contact_id))
            .set(payment_contacts::daily_clicks.eq(payment_contacts::daily_clicks + 1))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    async fn reset_daily_clicks(&self) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = diesel::update(payment_contacts::table)
            .set(payment_contacts::daily_clicks.eq(0))
            .execute(&mut conn)?;

        Ok(updated)
    }
}
