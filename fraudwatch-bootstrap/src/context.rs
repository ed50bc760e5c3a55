use std::sync::Arc;

use anyhow::Result;
use futures_util::future::BoxFuture;
use tracing::warn;

use fraudwatch_application::commands::snapshot_commands::load_snapshot;
use fraudwatch_application::{AppState, RefreshFn, SimulationController};
use fraudwatch_infrastructure::{AppConfig, HttpApiClient, TokioScheduler};

pub struct AppContext {
    pub state: AppState,
    pub controller: SimulationController,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config()?;

        let client = Arc::new(HttpApiClient::new(&runtime_config)?);
        let state = AppState::new(runtime_config.clone(), client.clone());

        let refresh_state = state.clone();
        let on_advance: RefreshFn = Arc::new(move || {
            let state = refresh_state.clone();
            Box::pin(async move {
                if let Err(err) = load_snapshot(&state).await {
                    warn!("post-advance snapshot reload failed: {}", err);
                }
            }) as BoxFuture<'static, ()>
        });

        let controller = SimulationController::new(
            client,
            Arc::new(TokioScheduler::new()),
            on_advance,
            state.metrics.clone(),
            &runtime_config,
        );

        Ok(Self { state, controller })
    }
}
