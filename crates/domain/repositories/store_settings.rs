use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::store_settings::StoreSettingsEntity;

#[async_trait]
#[automock]
pub trait StoreSettingsRepository {
    /// Loads the admin-owned storefront configuration. Values the admin never
    /// supplied come back as `None`.
    async fn load_settings(&self) -> Result<StoreSettingsEntity>;
}
