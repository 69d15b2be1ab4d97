//! Debounced trigger policy for advisory fetches.
//!
//! A change to the active target or view must wait a short quiescence
//! window before the fetch is issued; if another change arrives within
//! the window, the pending trigger is cancelled and no fetch goes out
//! for the superseded target. Cancellation is cooperative and only
//! effective before dispatch - a task that has started runs to
//! completion, and its result may still be cached (entries are keyed by
//! target + profile, not recency, so stale writes are harmless).

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default quiescence window before an advisory fetch is dispatched
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounced dispatcher: at most one pending task, newest wins.
#[derive(Debug)]
pub struct AdvisoryTrigger {
    window: Duration,
    pending: Option<CancellationToken>,
}

impl Default for AdvisoryTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl AdvisoryTrigger {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule `task` to run after the quiescence window.
    ///
    /// Cancels any previously scheduled task that has not yet been
    /// dispatched. Must be called from within a tokio runtime. The
    /// returned handle resolves when the task finishes or is superseded.
    pub fn schedule<F>(&mut self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel_pending();

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let window = self.window;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Advisory trigger superseded before dispatch");
                }
                _ = tokio::time::sleep(window) => {
                    // Dispatched: runs to completion even if superseded now
                    task.await;
                }
            }
        })
    }

    /// Cancel the pending trigger, if any, without scheduling a new one.
    /// Used when the session leaves the routing view.
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn flag_task(flag: &Arc<AtomicBool>) -> impl Future<Output = ()> + Send + 'static {
        let flag = Arc::clone(flag);
        async move {
            flag.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_after_window() {
        let mut trigger = AdvisoryTrigger::new(Duration::from_millis(300));
        let fired = Arc::new(AtomicBool::new(false));

        let handle = trigger.schedule(flag_task(&fired));
        handle.await.unwrap();

        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_within_window_supersedes() {
        let mut trigger = AdvisoryTrigger::new(Duration::from_millis(300));
        let first = Arc::new(AtomicBool::new(false));
        let second = Arc::new(AtomicBool::new(false));

        let h1 = trigger.schedule(flag_task(&first));
        // Let the first task register its timer before superseding it
        tokio::task::yield_now().await;
        let h2 = trigger.schedule(flag_task(&second));

        h1.await.unwrap();
        h2.await.unwrap();

        assert!(!first.load(Ordering::SeqCst), "superseded task must not fire");
        assert!(second.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_prevents_dispatch() {
        let mut trigger = AdvisoryTrigger::new(Duration::from_millis(300));
        let fired = Arc::new(AtomicBool::new(false));

        let handle = trigger.schedule(flag_task(&fired));
        tokio::task::yield_now().await;
        trigger.cancel_pending();

        handle.await.unwrap();
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_task_is_unaffected_by_later_schedules() {
        let mut trigger = AdvisoryTrigger::new(Duration::from_millis(300));
        let first = Arc::new(AtomicBool::new(false));
        let second = Arc::new(AtomicBool::new(false));

        let h1 = trigger.schedule(flag_task(&first));
        h1.await.unwrap();
        assert!(first.load(Ordering::SeqCst));

        let h2 = trigger.schedule(flag_task(&second));
        h2.await.unwrap();

        assert!(first.load(Ordering::SeqCst));
        assert!(second.load(Ordering::SeqCst));
    }
}
