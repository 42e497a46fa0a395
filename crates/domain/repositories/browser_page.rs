use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::browser_locators::Locator;

/// A single browser tab driven by the verification probe.
#[async_trait]
#[automock]
pub trait BrowserPage {
    async fn open(&self, url: String) -> Result<()>;
    async fn reload(&self) -> Result<()>;
    async fn run_script(&self, script: String) -> Result<()>;
    /// Polls until the element is displayed or `timeout` elapses. Never errors
    /// on absence; only transport failures are errors.
    async fn is_visible(&self, locator: Locator, timeout: Duration) -> Result<bool>;
    async fn click(&self, locator: Locator) -> Result<()>;
    async fn save_screenshot(&self, path: PathBuf) -> Result<()>;
    async fn close(&self) -> Result<()>;
}
