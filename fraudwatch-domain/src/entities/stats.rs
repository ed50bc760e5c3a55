// Aggregate statistics entities, as served by the backend

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionStats {
    pub total_detections: u64,
    pub wash_trading: u64,
    pub funding_fee: u64,
    pub cooperative: u64,
    pub total_sanctions: u64,
    #[serde(default)]
    pub bonus_details: WashTierBreakdown,
    #[serde(default)]
    pub funding_details: ScoreTierBreakdown,
    #[serde(default)]
    pub cooperative_details: ScoreTierBreakdown,
}

/// Wash-trading tiers (bot / manual / suspicious).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WashTierBreakdown {
    pub bot_tier: u64,
    pub manual_tier: u64,
    pub suspicious: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTierBreakdown {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
}

/// One time-series bucket with per-model detection counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub time: i64,
    #[serde(rename = "WASH_TRADING")]
    pub wash_trading: u64,
    #[serde(rename = "FUNDING_FEE")]
    pub funding_fee: u64,
    #[serde(rename = "COOPERATIVE")]
    pub cooperative: u64,
}

/// Detection counts keyed by hour of day (0-23).
pub type HourlyDistribution = HashMap<u8, u64>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadOutcome {
    pub status: String,
    pub message: String,
}
