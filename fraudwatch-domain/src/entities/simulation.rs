// Simulation clock entities
// The clock lives on the backend; these are read models of it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationHealth {
    Running,
    NotInitialized,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStatus {
    /// Absent until the backend has initialized its clock.
    pub current_time_ms: Option<i64>,
    pub status: SimulationHealth,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceOutcome {
    pub current_time_ms: i64,
    pub days_advanced: u32,
    pub hours_advanced: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub current_time_ms: i64,
    pub message: String,
}
