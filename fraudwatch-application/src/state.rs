use std::sync::Arc;

use fraudwatch_domain::entities::{
    DetectionCase,
    DetectionStats,
    HourlyDistribution,
    RuntimeConfig,
    TimeSeriesPoint,
    TopAccount,
    TradePair,
};
use fraudwatch_domain::ports::DetectionFeed;
use tokio::sync::RwLock;

use crate::Metrics;

/// One full fetch of the dashboard data, replaced wholesale on every reload.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DashboardSnapshot {
    pub stats: DetectionStats,
    pub cases: Vec<DetectionCase>,
    pub timeseries: Vec<TimeSeriesPoint>,
    pub backend_top_accounts: Vec<TopAccount>,
    pub hourly_distribution: HourlyDistribution,
    pub wash_trade_pairs: Vec<TradePair>,
    pub loaded_at_ms: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub feed: Arc<dyn DetectionFeed>,
    pub snapshot: Arc<RwLock<Option<DashboardSnapshot>>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: RuntimeConfig, feed: Arc<dyn DetectionFeed>) -> Self {
        Self {
            config,
            feed,
            snapshot: Arc::new(RwLock::new(None)),
            metrics: Arc::new(Metrics::default()),
        }
    }
}
