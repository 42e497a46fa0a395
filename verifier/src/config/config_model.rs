use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub app_url: String,
    pub webdriver_url: String,
    pub headless: bool,
    pub max_attempts: u32,
    pub screenshot_dir: PathBuf,
}
