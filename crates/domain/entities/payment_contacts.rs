use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::infra::db::postgres::schema::payment_contacts;

pub const FALLBACK_CONTACT_ID: &str = "def";

/// A human admin reachable over WhatsApp who settles payments manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentContactEntity {
    pub id: String,
    pub name: String,
    /// National number without the country prefix.
    pub number: String,
    pub daily_clicks: i32,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_contacts)]
pub struct PaymentContactRow {
    pub id: String,
    pub name: String,
    pub number: String,
    pub daily_clicks: i32,
    pub sort_order: i32,
}

impl From<PaymentContactRow> for PaymentContactEntity {
    fn from(value: PaymentContactRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            number: value.number,
            daily_clicks: value.daily_clicks,
        }
    }
}

pub fn fallback_payment_contact() -> PaymentContactEntity {
    PaymentContactEntity {
        id: FALLBACK_CONTACT_ID.to_string(),
        name: "Main Support".to_string(),
        number: "8227070298".to_string(),
        daily_clicks: 0,
    }
}
