// Runtime configuration entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Settings the application layers need at runtime, produced by the
/// infrastructure config loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    /// Fixed boundaries of the simulated analysis window; progress is always
    /// derived from these, never stored.
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Wall-clock seconds per simulated day while auto-playing.
    pub default_speed_seconds: u64,
    pub detection_fetch_limit: usize,
    pub ranking_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_seconds: 15,
            window_start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap_or_default(),
            window_end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
            default_speed_seconds: 86_400,
            detection_fetch_limit: 500,
            ranking_size: 5,
        }
    }
}
