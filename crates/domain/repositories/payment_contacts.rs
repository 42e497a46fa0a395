use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Write side of the payment contact load counters. Injected into the
/// storefront so the display flow never owns shared configuration.
#[async_trait]
#[automock]
pub trait PaymentContactClickRecorder {
    /// Returns `false` when no stored contact has this id.
    async fn record_click(&self, contact_id: String) -> Result<bool>;
    async fn reset_daily_clicks(&self) -> Result<usize>;
}
