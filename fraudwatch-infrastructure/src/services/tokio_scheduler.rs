// Tokio-backed repeating timer
// Production implementation of the Scheduler port. Tests drive ticks through
// a manual scheduler instead; this one is only exercised on a live runtime.

use std::time::Duration;

use tokio::sync::watch;

use fraudwatch_domain::ports::{ScheduleHandle, Scheduler, TickFn, TickOutcome};

#[derive(Debug, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn repeat(&self, period: Duration, mut tick: TickFn) -> ScheduleHandle {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        tokio::spawn(async move {
            // First fire one full period after arming, setInterval-style.
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                // Cancellation is only observed while waiting between ticks;
                // a tick that has started always runs to completion.
                tokio::select! {
                    _ = cancel_rx.changed() => break,
                    _ = interval.tick() => {
                        if tick().await == TickOutcome::Stop {
                            break;
                        }
                    }
                }
            }
        });
        ScheduleHandle::new(move || {
            let _ = cancel_tx.send(true);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn counting_tick(counter: Arc<AtomicUsize>, stop_after: usize) -> TickFn {
        Box::new(move || {
            let counter = counter.clone();
            Box::pin(async move {
                let fired = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if fired >= stop_after {
                    TickOutcome::Stop
                } else {
                    TickOutcome::Continue
                }
            })
        })
    }

    fn slow_tick(counter: Arc<AtomicUsize>, work: Duration) -> TickFn {
        Box::new(move || {
            let counter = counter.clone();
            Box::pin(async move {
                tokio::time::sleep(work).await;
                counter.fetch_add(1, Ordering::SeqCst);
                TickOutcome::Continue
            })
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_period_until_stopped() {
        let scheduler = TokioScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let _handle = scheduler.repeat(
            Duration::from_secs(5),
            counting_tick(counter.clone(), usize::MAX),
        );

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_handle_stops_the_loop() {
        let scheduler = TokioScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let handle = scheduler.repeat(
            Duration::from_secs(5),
            counting_tick(counter.clone(), usize::MAX),
        );

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_lets_an_in_flight_tick_run_to_completion() {
        let scheduler = TokioScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let handle = scheduler.repeat(
            Duration::from_secs(5),
            slow_tick(counter.clone(), Duration::from_secs(10)),
        );

        // tick fires at t=5 and is still working at t=6
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        handle.cancel();

        // the started tick lands at t=15; no further tick fires after it
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_outcome_ends_the_loop_without_cancel() {
        let scheduler = TokioScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let _handle = scheduler.repeat(Duration::from_secs(5), counting_tick(counter.clone(), 2));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
