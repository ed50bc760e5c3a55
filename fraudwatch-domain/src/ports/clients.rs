use async_trait::async_trait;

use crate::entities::{
    AdvanceOutcome,
    DetectionCase,
    DetectionStats,
    HourlyDistribution,
    ReloadOutcome,
    ResetOutcome,
    SimulationStatus,
    TimeSeriesPoint,
    TopAccount,
    TradePair,
};
use crate::error::{ApiError, SimulationError};
use crate::value_objects::{ModelFilter, ModelKind};

/// Commands and status of the backend-controlled simulation clock.
#[async_trait]
pub trait SimulationGateway: Send + Sync {
    /// Pure read; must tolerate an uninitialized clock (absent time).
    async fn status(&self) -> Result<SimulationStatus, SimulationError>;
    async fn advance(&self, days: u32, hours: u32) -> Result<AdvanceOutcome, SimulationError>;
    async fn reset(&self) -> Result<ResetOutcome, SimulationError>;
}

/// Read surface of the detection backend.
#[async_trait]
pub trait DetectionFeed: Send + Sync {
    async fn stats(&self) -> Result<DetectionStats, ApiError>;
    async fn detections(
        &self,
        model: ModelFilter,
        limit: Option<usize>,
    ) -> Result<Vec<DetectionCase>, ApiError>;
    async fn sanctions(
        &self,
        model: ModelFilter,
        limit: Option<usize>,
    ) -> Result<Vec<DetectionCase>, ApiError>;
    async fn timeseries(&self, interval: &str) -> Result<Vec<TimeSeriesPoint>, ApiError>;
    async fn top_accounts(&self, limit: usize) -> Result<Vec<TopAccount>, ApiError>;
    async fn hourly_distribution(&self) -> Result<HourlyDistribution, ApiError>;
    async fn trade_pairs(&self, model: ModelKind) -> Result<Vec<TradePair>, ApiError>;
    async fn reload(&self) -> Result<ReloadOutcome, ApiError>;
    async fn health(&self) -> Result<(), ApiError>;
}
