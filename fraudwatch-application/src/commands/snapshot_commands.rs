use fraudwatch_domain::utils::current_millis;
use fraudwatch_domain::value_objects::{ModelFilter, ModelKind};
use tracing::{error, info};

use crate::{AppError, AppState, DashboardSnapshot};

/// Fetches one consistent view of the dashboard data and replaces the stored
/// snapshot. All endpoints are hit concurrently; a single failure discards
/// the whole fetch so the snapshot never mixes epochs.
pub async fn load_snapshot(state: &AppState) -> Result<(), AppError> {
    let feed = &state.feed;
    let fetch_limit = state.config.detection_fetch_limit;

    let (stats, cases, timeseries, backend_top_accounts, hourly_distribution, wash_trade_pairs) =
        tokio::try_join!(
            feed.stats(),
            feed.detections(ModelFilter::All, Some(fetch_limit)),
            feed.timeseries("1h"),
            feed.top_accounts(10),
            feed.hourly_distribution(),
            feed.trade_pairs(ModelKind::Wash),
        )
        .map_err(|err| {
            error!("snapshot load failed: {}", err);
            AppError::Unavailable(err.to_string())
        })?;

    info!(
        "snapshot loaded: {} cases, {} sanctions",
        cases.len(),
        stats.total_sanctions
    );

    let snapshot = DashboardSnapshot {
        stats,
        cases,
        timeseries,
        backend_top_accounts,
        hourly_distribution,
        wash_trade_pairs,
        loaded_at_ms: current_millis(),
    };
    *state.snapshot.write().await = Some(snapshot);
    state.metrics.record_snapshot_load();
    Ok(())
}

/// Asks the backend to re-read its source data, then reloads the snapshot.
pub async fn reload_backend_data(state: &AppState) -> Result<(), AppError> {
    let outcome = state
        .feed
        .reload()
        .await
        .map_err(|err| AppError::Unavailable(err.to_string()))?;
    info!("backend reload: {}", outcome.message);
    load_snapshot(state).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use fraudwatch_domain::entities::{
        CasePayload,
        DetectionCase,
        DetectionStats,
        HourlyDistribution,
        ReloadOutcome,
        RuntimeConfig,
        TimeSeriesPoint,
        TopAccount,
        TradePair,
    };
    use fraudwatch_domain::error::ApiError;
    use fraudwatch_domain::ports::DetectionFeed;

    use super::*;

    #[derive(Default)]
    struct StubFeed {
        fail_stats: AtomicBool,
    }

    #[async_trait]
    impl DetectionFeed for StubFeed {
        async fn stats(&self) -> Result<DetectionStats, ApiError> {
            if self.fail_stats.load(Ordering::SeqCst) {
                return Err(ApiError::remote(503, None));
            }
            Ok(DetectionStats {
                total_detections: 1,
                total_sanctions: 1,
                ..Default::default()
            })
        }

        async fn detections(
            &self,
            _model: ModelFilter,
            _limit: Option<usize>,
        ) -> Result<Vec<DetectionCase>, ApiError> {
            Ok(vec![DetectionCase {
                id: "w1".to_string(),
                model: ModelKind::Wash,
                timestamp_ms: 1_738_368_000_000,
                kind: "IMMEDIATE_BOT".to_string(),
                accounts: vec!["A".to_string()],
                score: 91.0,
                is_sanctioned: true,
                sanction_id: Some("s1".to_string()),
                sanction_type: Some("BOT".to_string()),
                details: String::new(),
                payload: CasePayload::Wash {
                    laundered_amount: 10.0,
                    winner_account: Some("A".to_string()),
                    trade_pair_ids: vec![],
                },
            }])
        }

        async fn sanctions(
            &self,
            _model: ModelFilter,
            _limit: Option<usize>,
        ) -> Result<Vec<DetectionCase>, ApiError> {
            Ok(vec![])
        }

        async fn timeseries(&self, _interval: &str) -> Result<Vec<TimeSeriesPoint>, ApiError> {
            Ok(vec![])
        }

        async fn top_accounts(&self, _limit: usize) -> Result<Vec<TopAccount>, ApiError> {
            Ok(vec![])
        }

        async fn hourly_distribution(&self) -> Result<HourlyDistribution, ApiError> {
            Ok(HashMap::new())
        }

        async fn trade_pairs(&self, _model: ModelKind) -> Result<Vec<TradePair>, ApiError> {
            Ok(vec![])
        }

        async fn reload(&self) -> Result<ReloadOutcome, ApiError> {
            Ok(ReloadOutcome {
                status: "ok".to_string(),
                message: "reloaded".to_string(),
            })
        }

        async fn health(&self) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_snapshot_stores_fetched_data() {
        let state = AppState::new(RuntimeConfig::default(), Arc::new(StubFeed::default()));
        load_snapshot(&state).await.expect("load snapshot");

        let snapshot = state.snapshot.read().await;
        let snapshot = snapshot.as_ref().expect("snapshot present");
        assert_eq!(snapshot.cases.len(), 1);
        assert_eq!(snapshot.stats.total_sanctions, 1);
    }

    #[tokio::test]
    async fn reload_refreshes_backend_then_snapshot() {
        let state = AppState::new(RuntimeConfig::default(), Arc::new(StubFeed::default()));
        reload_backend_data(&state).await.expect("reload");
        assert!(state.snapshot.read().await.is_some());
    }

    #[tokio::test]
    async fn partial_failure_keeps_previous_snapshot() {
        let feed = Arc::new(StubFeed::default());
        let state = AppState::new(RuntimeConfig::default(), feed.clone());
        load_snapshot(&state).await.expect("first load");

        feed.fail_stats.store(true, Ordering::SeqCst);
        let err = load_snapshot(&state).await.expect_err("second load fails");
        assert!(matches!(err, AppError::Unavailable(_)));

        let snapshot = state.snapshot.read().await;
        assert!(snapshot.is_some());
    }
}
