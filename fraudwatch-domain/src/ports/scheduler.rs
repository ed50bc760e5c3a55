use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Outcome of one repeating-timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

pub type TickFuture = Pin<Box<dyn Future<Output = TickOutcome> + Send>>;
pub type TickFn = Box<dyn FnMut() -> TickFuture + Send>;

/// Repeating-timer abstraction. Production uses tokio timers; tests drive
/// ticks manually instead of sleeping.
pub trait Scheduler: Send + Sync {
    /// Arms a timer that invokes `tick` once per `period`, starting one full
    /// period after arming, until `tick` returns [`TickOutcome::Stop`] or the
    /// handle is cancelled.
    fn repeat(&self, period: Duration, tick: TickFn) -> ScheduleHandle;
}

/// Cancellation token for an armed timer. Cancels on drop, so a replaced
/// handle can never leave a stale timer running.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.fire();
    }
}

impl std::fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn handle_cancels_exactly_once() {
        let cancelled = Arc::new(AtomicUsize::new(0));
        let counter = cancelled.clone();
        let handle = ScheduleHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handle_cancels_on_drop() {
        let cancelled = Arc::new(AtomicUsize::new(0));
        let counter = cancelled.clone();
        drop(ScheduleHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }
}
