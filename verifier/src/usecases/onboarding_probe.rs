use anyhow::{Context, Result, bail};
use crates::domain::{
    repositories::browser_page::BrowserPage, value_objects::browser_locators::Locator,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{debug, error, info, warn};

use super::seed_state::{admin_test_user, minimal_system_settings, seed_script};
use crate::config::config_model::DotEnvyConfig;

pub const TARGET_ENTRY_TEXT: &str = "AI Studio";
pub const SUCCESS_SCREENSHOT: &str = "ai_studio_success.png";
pub const ERROR_SCREENSHOT: &str = "error.png";

pub const EXPECTED_LABELS: [&str; 5] = [
    "AI Content Studio",
    "API Configuration",
    "Normal Notes Prompt",
    "Premium Notes Prompt",
    "MCQ Generator Prompt",
];

#[derive(Debug, Clone)]
pub struct ProbeTimings {
    /// Pause before each sweep so the UI can settle.
    pub settle: Duration,
    /// Pause after a successful dismissal.
    pub after_dismiss: Duration,
    pub popup_probe: Duration,
    pub target_probe: Duration,
    pub target_wait: Duration,
    pub label_wait: Duration,
}

impl Default for ProbeTimings {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(500),
            after_dismiss: Duration::from_millis(1000),
            popup_probe: Duration::from_millis(200),
            target_probe: Duration::from_millis(100),
            target_wait: Duration::from_secs(5),
            label_wait: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub app_url: String,
    pub max_attempts: u32,
    pub screenshot_dir: PathBuf,
    pub timings: ProbeTimings,
}

impl From<&DotEnvyConfig> for ProbeSettings {
    fn from(config: &DotEnvyConfig) -> Self {
        Self {
            app_url: config.app_url.clone(),
            max_attempts: config.max_attempts,
            screenshot_dir: config.screenshot_dir.clone(),
            timings: ProbeTimings::default(),
        }
    }
}

/// An overlay the app may show on boot, with the control that closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dismissal {
    pub name: &'static str,
    pub locator: Locator,
}

/// Dismissals in priority order. Only the first visible one is clicked per sweep.
pub fn onboarding_dismissals() -> Vec<Dismissal> {
    vec![
        Dismissal {
            name: "welcome",
            locator: Locator::button_containing(&["Resume Learning", "Get Started"]),
        },
        Dismissal {
            name: "daily_goal",
            locator: Locator::exact_text("Continue Learning"),
        },
        Dismissal {
            name: "terms",
            locator: Locator::button_containing_ignore_case("I Agree & Continue"),
        },
        Dismissal {
            name: "generic_close",
            locator: Locator::css("button.absolute.right-4.top-4"),
        },
    ]
}

pub fn target_entry() -> Locator {
    Locator::text_containing(TARGET_ENTRY_TEXT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOutcome {
    TargetVisible {
        attempts: u32,
        dismissed: Vec<&'static str>,
    },
    AttemptsExhausted {
        attempts: u32,
        dismissed: Vec<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub popups: PopupOutcome,
    pub screenshot: PathBuf,
}

pub struct OnboardingProbeUseCase<P>
where
    P: BrowserPage + Send + Sync,
{
    page: Arc<P>,
    settings: ProbeSettings,
}

impl<P> OnboardingProbeUseCase<P>
where
    P: BrowserPage + Send + Sync,
{
    pub fn new(page: Arc<P>, settings: ProbeSettings) -> Self {
        Self { page, settings }
    }

    /// Runs the whole probe. On failure an error screenshot is attempted
    /// before the original error is returned.
    pub async fn verify(&self) -> Result<ProbeReport> {
        match self.run().await {
            Ok(report) => Ok(report),
            Err(err) => {
                error!(error = %format!("{:#}", err), "onboarding_probe: verification failed");
                let path = self.settings.screenshot_dir.join(ERROR_SCREENSHOT);
                if let Err(shot_err) = self.page.save_screenshot(path.clone()).await {
                    warn!(
                        path = %path.display(),
                        error = %shot_err,
                        "onboarding_probe: error screenshot not written"
                    );
                } else {
                    info!(path = %path.display(), "onboarding_probe: error screenshot written");
                }
                Err(err)
            }
        }
    }

    pub async fn run(&self) -> Result<ProbeReport> {
        self.seed_state().await?;
        let popups = self.clear_popups().await;
        self.open_target().await?;
        self.assert_labels().await?;

        let screenshot = self.settings.screenshot_dir.join(SUCCESS_SCREENSHOT);
        self.page
            .save_screenshot(screenshot.clone())
            .await
            .context("failed to write success screenshot")?;
        info!(path = %screenshot.display(), "onboarding_probe: verification passed");

        Ok(ProbeReport { popups, screenshot })
    }

    /// Loads the app, writes the persisted state an onboarded admin would
    /// have, then reloads so the app boots from it.
    pub async fn seed_state(&self) -> Result<()> {
        self.page
            .open(self.settings.app_url.clone())
            .await
            .with_context(|| format!("failed to open {}", self.settings.app_url))?;

        let script = seed_script(&admin_test_user(), &minimal_system_settings());
        self.page
            .run_script(script)
            .await
            .context("failed to seed browser storage")?;

        self.page.reload().await.context("failed to reload after seeding")?;
        info!(app_url = %self.settings.app_url, "onboarding_probe: state seeded");
        Ok(())
    }

    /// Sweeps for overlays until the target entry shows or attempts run out.
    /// Probe and click failures count as "not found"; this step never fails.
    pub async fn clear_popups(&self) -> PopupOutcome {
        let timings = &self.settings.timings;
        let dismissals = onboarding_dismissals();
        let mut dismissed = Vec::new();

        for attempt in 1..=self.settings.max_attempts {
            tokio::time::sleep(timings.settle).await;

            if let Some(name) = self.dismiss_first_visible(&dismissals).await {
                info!(attempt, popup = name, "onboarding_probe: popup dismissed");
                dismissed.push(name);
                tokio::time::sleep(timings.after_dismiss).await;
                continue;
            }

            if self.probe(target_entry(), timings.target_probe).await {
                debug!(attempt, "onboarding_probe: target entry visible");
                return PopupOutcome::TargetVisible {
                    attempts: attempt,
                    dismissed,
                };
            }
        }

        warn!(
            attempts = self.settings.max_attempts,
            dismissed = ?dismissed,
            "onboarding_probe: popup sweep exhausted"
        );
        PopupOutcome::AttemptsExhausted {
            attempts: self.settings.max_attempts,
            dismissed,
        }
    }

    pub async fn open_target(&self) -> Result<()> {
        let target = target_entry();
        if !self
            .page
            .is_visible(target.clone(), self.settings.timings.target_wait)
            .await?
        {
            bail!("target entry {} is not visible", target);
        }

        self.page
            .click(target)
            .await
            .context("failed to open the AI Studio entry")?;
        info!("onboarding_probe: target opened");
        Ok(())
    }

    /// Fails on the first label that does not appear.
    pub async fn assert_labels(&self) -> Result<()> {
        for label in EXPECTED_LABELS {
            let visible = self
                .page
                .is_visible(
                    Locator::text_containing(label),
                    self.settings.timings.label_wait,
                )
                .await?;
            if !visible {
                bail!("expected label '{}' is not visible", label);
            }
            debug!(label, "onboarding_probe: label visible");
        }
        Ok(())
    }

    async fn dismiss_first_visible(&self, dismissals: &[Dismissal]) -> Option<&'static str> {
        for dismissal in dismissals {
            if !self
                .probe(dismissal.locator.clone(), self.settings.timings.popup_probe)
                .await
            {
                continue;
            }

            match self.page.click(dismissal.locator.clone()).await {
                Ok(()) => return Some(dismissal.name),
                Err(err) => {
                    debug!(popup = dismissal.name, error = %err, "onboarding_probe: dismiss click failed");
                }
            }
        }
        None
    }

    async fn probe(&self, locator: Locator, timeout: Duration) -> bool {
        match self.page.is_visible(locator.clone(), timeout).await {
            Ok(visible) => visible,
            Err(err) => {
                debug!(%locator, error = %err, "onboarding_probe: probe failed");
                false
            }
        }
    }
}
