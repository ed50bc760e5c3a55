use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use fraudwatch_domain::entities::RuntimeConfig;
use fraudwatch_domain::utils::parse_date;

use super::validation::validate_base_url;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    /// Analysis window boundaries, `YYYY-MM-DD`.
    pub window_start: String,
    pub window_end: String,
    /// Wall-clock seconds per simulated day while auto-playing.
    pub default_speed_seconds: u64,
    pub detection_fetch_limit: usize,
    pub ranking_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_seconds: 15,
            window_start: "2025-02-01".to_string(),
            window_end: "2025-12-31".to_string(),
            default_speed_seconds: 86_400,
            detection_fetch_limit: 500,
            ranking_size: 5,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("FRAUDWATCH_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("FRAUDWATCH_API_URL") {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(timeout) = env::var("FRAUDWATCH_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.request_timeout_seconds = value;
            }
        }
        if let Ok(speed) = env::var("FRAUDWATCH_SPEED_SECONDS") {
            if let Ok(value) = speed.parse() {
                self.default_speed_seconds = value;
            }
        }
    }

    pub fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.window_start = self.window_start.trim().to_string();
        self.window_end = self.window_end.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.api_base_url)?;
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be positive"));
        }
        if self.default_speed_seconds == 0 {
            return Err(anyhow!("default_speed_seconds must be positive"));
        }
        if self.ranking_size == 0 {
            return Err(anyhow!("ranking_size must be positive"));
        }
        if self.detection_fetch_limit == 0 {
            return Err(anyhow!("detection_fetch_limit must be positive"));
        }
        let start = parse_date(&self.window_start)?;
        let end = parse_date(&self.window_end)?;
        if end <= start {
            return Err(anyhow!(
                "window_end {} must be after window_start {}",
                self.window_end,
                self.window_start
            ));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            api_base_url: self.api_base_url.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            window_start: parse_date(&self.window_start)?,
            window_end: parse_date(&self.window_end)?,
            default_speed_seconds: self.default_speed_seconds,
            detection_fetch_limit: self.detection_fetch_limit,
            ranking_size: self.ranking_size,
        })
    }
}
