// Ranking time-window value object

use serde::{Deserialize, Serialize};

use crate::utils::MILLIS_PER_DAY;

/// Lookback window for the local account ranking, measured backward from the
/// newest case timestamp rather than wall clock, so it stays correct under
/// simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    pub fn window_millis(&self) -> i64 {
        match self {
            Period::Day => MILLIS_PER_DAY,
            Period::Week => 7 * MILLIS_PER_DAY,
            Period::Month => 30 * MILLIS_PER_DAY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            _ => None,
        }
    }
}
