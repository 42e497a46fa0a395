use anyhow::Result;
use crates::{
    domain::repositories::browser_page::BrowserPage,
    infra::web_driver::browser_page::WebDriverBrowserPage,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use verifier::{
    config,
    usecases::onboarding_probe::{OnboardingProbeUseCase, ProbeSettings},
};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(error) = run().await {
        error!("Verifier exited with error: {:#}", error);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    crates::observability::init_observability("verifier")?;

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let page = Arc::new(
        WebDriverBrowserPage::connect(&dotenvy_env.webdriver_url, dotenvy_env.headless).await?,
    );
    info!(webdriver_url = %dotenvy_env.webdriver_url, "WebDriver session has been started");

    let usecase = OnboardingProbeUseCase::new(Arc::clone(&page), ProbeSettings::from(&dotenvy_env));
    let result = usecase.verify().await;

    if let Err(err) = page.close().await {
        warn!(error = %err, "verifier: failed to close WebDriver session");
    }

    let report = result?;
    info!(
        screenshot = %report.screenshot.display(),
        popups = ?report.popups,
        "verifier: AI Studio verified"
    );
    Ok(())
}
