use super::config_model::DotEnvyConfig;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use url::Url;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let app_url = lookup("VERIFIER_APP_URL").unwrap_or_else(|| "http://localhost:5000".to_string());
    Url::parse(&app_url).context("VERIFIER_APP_URL is invalid")?;

    let webdriver_url =
        lookup("VERIFIER_WEBDRIVER_URL").unwrap_or_else(|| "http://localhost:4444".to_string());
    Url::parse(&webdriver_url).context("VERIFIER_WEBDRIVER_URL is invalid")?;

    let headless = lookup("VERIFIER_HEADLESS")
        .unwrap_or_else(|| "true".to_string())
        .parse()
        .context("VERIFIER_HEADLESS is invalid")?;

    let max_attempts: u32 = lookup("VERIFIER_MAX_ATTEMPTS")
        .unwrap_or_else(|| "5".to_string())
        .parse()
        .context("VERIFIER_MAX_ATTEMPTS is invalid")?;
    if max_attempts == 0 {
        bail!("VERIFIER_MAX_ATTEMPTS must be at least 1");
    }

    let screenshot_dir = PathBuf::from(
        lookup("VERIFIER_SCREENSHOT_DIR").unwrap_or_else(|| "verification".to_string()),
    );

    Ok(DotEnvyConfig {
        app_url,
        webdriver_url,
        headless,
        max_attempts,
        screenshot_dir,
    })
}
