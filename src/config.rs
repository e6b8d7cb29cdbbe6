use crate::constants::{
    DEFAULT_LOG_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, ILOVEQATAR_BASE_URL,
    PAGE_NUM_PLACEHOLDER,
};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    scraper: ScraperConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Number of index pages to walk, starting at 1
    pub pages: i64,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub output_dir: String,
    /// Directory for the rolling JSON log file
    pub log_dir: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            pages: 1,
            base_url: ILOVEQATAR_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Defaults, then the TOML file if it exists, then `ILQ_*` environment variables.
    pub fn load(config_path: &str) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.scraper)
    }

    /// Overlay values from a key lookup (the process environment in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pages) = lookup("ILQ_PAGES") {
            self.pages = pages.trim().parse().map_err(|_| {
                ScraperError::Config(format!("ILQ_PAGES must be an integer, got '{}'", pages))
            })?;
        }
        if let Some(base_url) = lookup("ILQ_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(user_agent) = lookup("ILQ_USER_AGENT") {
            self.user_agent = user_agent;
        }
        if let Some(timeout) = lookup("ILQ_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse().map_err(|_| {
                ScraperError::Config(format!(
                    "ILQ_TIMEOUT_SECONDS must be a positive integer, got '{}'",
                    timeout
                ))
            })?;
        }
        if let Some(output_dir) = lookup("ILQ_OUTPUT_DIR") {
            self.output_dir = output_dir;
        }
        if let Some(log_dir) = lookup("ILQ_LOG_DIR") {
            self.log_dir = log_dir;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_url.contains(PAGE_NUM_PLACEHOLDER) {
            return Err(ScraperError::Config(format!(
                "base_url '{}' is missing the {} placeholder",
                self.base_url, PAGE_NUM_PLACEHOLDER
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ScraperError::Config("timeout_seconds must be > 0".into()));
        }
        Ok(())
    }
}
