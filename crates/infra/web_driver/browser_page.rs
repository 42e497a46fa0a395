use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement};
use tracing::{debug, info};
use url::Url;

use crate::domain::{
    repositories::browser_page::BrowserPage, value_objects::browser_locators::Locator,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
// XPath 1.0 has no lower-case(); translate() folds ASCII only.
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

pub struct WebDriverBrowserPage {
    driver: WebDriver,
}

impl WebDriverBrowserPage {
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.set_headless()?;
        }
        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .with_context(|| format!("failed to open webdriver session at {webdriver_url}"))?;
        driver.maximize_window().await?;
        info!(%webdriver_url, headless, "browser_page: session started");
        Ok(Self { driver })
    }

    async fn displayed_elements(&self, locator: &Locator) -> Result<Vec<WebElement>> {
        let elements = self.driver.find_all(to_by(locator)).await?;
        let mut displayed = Vec::new();
        for element in elements {
            // Elements can go stale between lookup and check while popups animate out.
            if element.is_displayed().await.unwrap_or(false) {
                displayed.push(element);
            }
        }
        Ok(displayed)
    }
}

#[async_trait]
impl BrowserPage for WebDriverBrowserPage {
    async fn open(&self, url: String) -> Result<()> {
        let url = Url::parse(&url)?;
        self.driver.goto(url.as_str()).await?;
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.driver.refresh().await?;
        Ok(())
    }

    async fn run_script(&self, script: String) -> Result<()> {
        self.driver.execute(script.as_str(), Vec::new()).await?;
        Ok(())
    }

    async fn is_visible(&self, locator: Locator, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.displayed_elements(&locator).await?.is_empty() {
                debug!(%locator, "browser_page: element visible");
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn click(&self, locator: Locator) -> Result<()> {
        let element = self
            .displayed_elements(&locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no visible element for {locator}"))?;
        element.click().await?;
        Ok(())
    }

    async fn save_screenshot(&self, path: PathBuf) -> Result<()> {
        let png_bytes = self.driver.screenshot_as_png().await?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &png_bytes).await?;
        info!(path = %path.display(), "browser_page: screenshot saved");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.driver.clone().quit().await?;
        Ok(())
    }
}

fn to_by(locator: &Locator) -> By {
    match locator {
        Locator::ButtonContaining(fragments) => {
            let conditions = fragments
                .iter()
                .map(|fragment| format!("contains(., {})", xpath_literal(fragment)))
                .collect::<Vec<_>>()
                .join(" or ");
            By::XPath(format!("//button[{conditions}]"))
        }
        Locator::ButtonContainingIgnoreCase(fragment) => {
            By::XPath(button_ignore_case_xpath(fragment))
        }
        Locator::ExactText(text) => {
            By::XPath(format!("//*[normalize-space(text())={}]", xpath_literal(text)))
        }
        Locator::TextContaining(text) => {
            By::XPath(format!("//*[contains(text(), {})]", xpath_literal(text)))
        }
        Locator::Css(selector) => By::Css(selector.clone()),
    }
}

fn button_ignore_case_xpath(fragment: &str) -> String {
    format!(
        "//button[contains(translate(., '{UPPER}', '{LOWER}'), {})]",
        xpath_literal(&fragment.to_ascii_lowercase())
    )
}

/// XPath 1.0 has no escape sequences, so strings with both quote kinds need `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    let parts = value
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect::<Vec<_>>()
        .join(", \"'\", ");
    format!("concat({parts})")
}
