use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::infra::db::postgres::schema::credit_packages;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPackageEntity {
    pub id: String,
    pub name: String,
    pub credits: i32,
    pub price: i32,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = credit_packages)]
pub struct CreditPackageRow {
    pub id: String,
    pub name: String,
    pub credits: i32,
    pub price: i32,
    pub sort_order: i32,
}

impl From<CreditPackageRow> for CreditPackageEntity {
    fn from(value: CreditPackageRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            credits: value.credits,
            price: value.price,
        }
    }
}

/// Built-in coin catalog shown when the admin has not configured any packages.
pub fn default_credit_packages() -> Vec<CreditPackageEntity> {
    [
        (100, 10),
        (200, 20),
        (500, 50),
        (1000, 100),
        (2000, 200),
        (5000, 500),
        (10000, 1000),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (credits, price))| CreditPackageEntity {
        id: format!("pkg-{}", index + 1),
        name: format!("{} Credits", credits),
        credits,
        price,
    })
    .collect()
}
