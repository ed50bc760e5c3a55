// Simulation playback controller
// Owns the local view of the backend simulation clock and drives the
// auto-advance loop. All clock mutations go through the injected gateway;
// errors never escape the controller, callers observe the `error` field.

use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use chrono::NaiveDate;
use fraudwatch_domain::entities::RuntimeConfig;
use fraudwatch_domain::error::SimulationError;
use fraudwatch_domain::ports::{ScheduleHandle, Scheduler, SimulationGateway, TickOutcome};
use fraudwatch_domain::services::jump_to_date;
use fraudwatch_domain::utils::MILLIS_PER_DAY;
use futures_util::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::Metrics;

/// Injected data-refresh hook, awaited after every successful state-changing
/// command. The controller has no knowledge of what it does.
pub type RefreshFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Debug, Clone, serde::Serialize)]
pub struct SimulationState {
    pub is_playing: bool,
    /// Wall-clock seconds per simulated day; smaller = faster.
    pub speed_seconds: u64,
    /// None until the first status fetch succeeds.
    pub current_time_ms: Option<i64>,
    /// 0-100, always derived from `current_time_ms` and the window
    /// boundaries, never stored independently.
    pub progress: f64,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub is_loading: bool,
    pub error: Option<String>,
}

struct ControllerInner {
    gateway: Arc<dyn SimulationGateway>,
    scheduler: Arc<dyn Scheduler>,
    on_advance: RefreshFn,
    metrics: Arc<Metrics>,
    state: RwLock<SimulationState>,
    // At most one armed auto-advance timer. No await while this lock is held.
    timer: StdMutex<Option<ScheduleHandle>>,
}

#[derive(Clone)]
pub struct SimulationController {
    inner: Arc<ControllerInner>,
}

impl SimulationController {
    pub fn new(
        gateway: Arc<dyn SimulationGateway>,
        scheduler: Arc<dyn Scheduler>,
        on_advance: RefreshFn,
        metrics: Arc<Metrics>,
        config: &RuntimeConfig,
    ) -> Self {
        let state = SimulationState {
            is_playing: false,
            speed_seconds: config.default_speed_seconds,
            current_time_ms: None,
            progress: 0.0,
            window_start: config.window_start,
            window_end: config.window_end,
            is_loading: false,
            error: None,
        };
        Self {
            inner: Arc::new(ControllerInner {
                gateway,
                scheduler,
                on_advance,
                metrics,
                state: RwLock::new(state),
                timer: StdMutex::new(None),
            }),
        }
    }

    pub async fn snapshot(&self) -> SimulationState {
        self.inner.state.read().await.clone()
    }

    /// Re-reads the backend clock. Tolerates an uninitialized clock; records
    /// fetch failures without clearing a prior command error.
    pub async fn refresh_status(&self) {
        self.inner.refresh_status().await;
    }

    /// Play/pause. Never blocked by `is_loading`: it only flips local state
    /// and (dis)arms the timer, no network call involved.
    pub async fn toggle(&self) {
        let (now_playing, speed) = {
            let mut state = self.inner.state.write().await;
            state.is_playing = !state.is_playing;
            (state.is_playing, state.speed_seconds)
        };
        if now_playing {
            info!("simulation playback started ({}s per day)", speed);
            self.inner.arm_timer(speed);
        } else {
            info!("simulation playback paused");
            self.inner.clear_timer();
        }
    }

    /// Returns the simulation to the start of the analysis window. Always
    /// leaves the controller idle, whatever the prior playback state.
    pub async fn reset(&self) {
        if !self.inner.begin_command().await {
            return;
        }
        let result = self.inner.gateway.reset().await.map(|outcome| {
            debug!("simulation reset: {}", outcome.message);
        });
        self.inner.finish_command(result).await;
    }

    /// One-shot manual advance; cancels any running playback first.
    pub async fn skip(&self, days: u32) {
        if !self.inner.begin_command().await {
            return;
        }
        let result = self
            .inner
            .gateway
            .advance(days, 0)
            .await
            .map(|outcome| {
                debug!(
                    "simulation advanced {}d{}h: {}",
                    outcome.days_advanced, outcome.hours_advanced, outcome.message
                );
            });
        self.inner.finish_command(result).await;
    }

    /// Forward-only whole-day jump, see
    /// [`fraudwatch_domain::services::jump_to_date`].
    pub async fn jump_to(&self, date: NaiveDate) {
        if !self.inner.begin_command().await {
            return;
        }
        let result = jump_to_date(self.inner.gateway.as_ref(), date)
            .await
            .map(|outcome| {
                debug!("simulation jumped {} days", outcome.days_advanced);
            });
        self.inner.finish_command(result).await;
    }

    /// Updates playback speed. While playing, the active timer is torn down
    /// and re-armed so the old period can never fire again.
    pub async fn change_speed(&self, speed_seconds: u64) {
        let playing = {
            let mut state = self.inner.state.write().await;
            state.speed_seconds = speed_seconds.max(1);
            state.is_playing
        };
        if playing {
            self.inner.clear_timer();
            self.inner.arm_timer(speed_seconds.max(1));
        }
    }
}

impl ControllerInner {
    fn arm_timer(self: &Arc<Self>, speed_seconds: u64) {
        let inner = Arc::clone(self);
        let tick = Box::new(move || {
            let inner = Arc::clone(&inner);
            Box::pin(async move { inner.auto_tick().await }) as BoxFuture<'static, TickOutcome>
        });
        let handle = self
            .scheduler
            .repeat(Duration::from_secs(speed_seconds), tick);
        let mut slot = self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Dropping a previous handle cancels it before the new one starts.
        *slot = Some(handle);
    }

    fn clear_timer(&self) {
        let mut slot = self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = slot.take() {
            handle.cancel();
        }
    }

    /// One auto-advance step: +1 simulated day. A failure stops playback
    /// rather than retrying silently.
    async fn auto_tick(self: Arc<Self>) -> TickOutcome {
        if !self.state.read().await.is_playing {
            return TickOutcome::Stop;
        }
        match self.gateway.advance(1, 0).await {
            Ok(_) => {
                self.metrics.record_auto_tick();
                self.refresh_status().await;
                (self.on_advance)().await;
                TickOutcome::Continue
            }
            Err(err) => {
                warn!("auto-advance failed, pausing playback: {}", err);
                self.metrics.record_command_error();
                let mut state = self.state.write().await;
                state.is_playing = false;
                state.error = Some(err.to_string());
                TickOutcome::Stop
            }
        }
    }

    /// Shared command prologue: cancel playback, reject overlapping commands,
    /// clear the previous error, raise `is_loading`.
    async fn begin_command(&self) -> bool {
        {
            let mut state = self.state.write().await;
            if state.is_loading {
                warn!("simulation command ignored, another command is in flight");
                return false;
            }
            state.is_loading = true;
            state.is_playing = false;
            state.error = None;
        }
        self.clear_timer();
        self.metrics.record_command();
        true
    }

    /// Shared command epilogue. On success the status refetch happens before
    /// the refresh callback, so the callback observes the post-command clock.
    async fn finish_command(&self, result: Result<(), SimulationError>) {
        match result {
            Ok(()) => {
                self.refresh_status().await;
                (self.on_advance)().await;
            }
            Err(err) => {
                self.metrics.record_command_error();
                let mut state = self.state.write().await;
                state.error = Some(err.to_string());
            }
        }
        self.state.write().await.is_loading = false;
    }

    async fn refresh_status(&self) {
        match self.gateway.status().await {
            Ok(status) => {
                if let Some(current_ms) = status.current_time_ms {
                    let mut state = self.state.write().await;
                    state.current_time_ms = Some(current_ms);
                    state.progress =
                        window_progress(current_ms, state.window_start, state.window_end);
                }
            }
            Err(err) => {
                warn!("failed to fetch simulation status: {}", err);
                let mut state = self.state.write().await;
                state.error = Some(err.to_string());
            }
        }
    }
}

/// Percentage of the analysis window covered by `current_ms`, clamped to
/// [0, 100].
fn window_progress(current_ms: i64, start: NaiveDate, end: NaiveDate) -> f64 {
    let start_ms = start
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0);
    let end_ms = end
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(start_ms + MILLIS_PER_DAY);
    if end_ms <= start_ms {
        return 0.0;
    }
    let ratio = (current_ms - start_ms) as f64 / (end_ms - start_ms) as f64;
    (ratio * 100.0).clamp(0.0, 100.0)
}
