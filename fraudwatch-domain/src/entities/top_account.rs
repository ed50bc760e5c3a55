// Top account entity
// Derived aggregate: either served by the backend or recomputed locally from
// the flat case list. Never mutated in place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAccount {
    pub account_id: String,
    pub total_cases: u64,
    pub total_profit_loss: f64,
    pub profits: ProfitBreakdown,
    pub avg_score: f64,
    pub max_score: f64,
    pub critical_count: u64,
    pub high_count: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub funding: f64,
    pub wash: f64,
    pub cooperative: f64,
}

impl ProfitBreakdown {
    pub fn total(&self) -> f64 {
        self.funding + self.wash + self.cooperative
    }
}
