//! Simulated progress for generation and AI modification
//!
//! A [`ProgressEmitter`] owns at most one run at a time. A run counts from 0
//! to 100 in fixed steps on a fixed tick, publishes every value on a
//! `watch` channel and calls its completion callback exactly once when it
//! reaches 100. Cancelling a run (explicitly, by starting another one, or by
//! dropping the emitter) guarantees the callback never fires.

use crate::config::ProgressConfig;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Final value of every completed run
pub const PROGRESS_COMPLETE: u8 = 100;

/// Shortest tick a run will use
pub const MIN_TICK: Duration = Duration::from_millis(1);

struct ProgressRun {
    token: CancellationToken,
    handle: JoinHandle<()>,
    updates: watch::Receiver<u8>,
}

impl ProgressRun {
    fn stop(self) {
        self.token.cancel();
        self.handle.abort();
    }
}

/// Single-owner, cancellable progress timer
///
/// Runs are spawned on the current tokio runtime, so [`ProgressEmitter::start`]
/// must be called from within one.
///
/// # Examples
///
/// ```
/// use casebench::progress::ProgressEmitter;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let mut emitter = ProgressEmitter::new(50, Duration::from_millis(1));
///     let (tx, rx) = tokio::sync::oneshot::channel();
///     let updates = emitter.start(move || {
///         let _ = tx.send(());
///     });
///     rx.await.unwrap();
///     assert_eq!(*updates.borrow(), 100);
/// }
/// ```
pub struct ProgressEmitter {
    step: u8,
    tick: Duration,
    current: Option<ProgressRun>,
}

impl ProgressEmitter {
    /// Creates an emitter advancing by `step` every `tick`
    ///
    /// A zero step is bumped to 1 so every run terminates, and a tick
    /// shorter than [`MIN_TICK`] is raised to it.
    pub fn new(step: u8, tick: Duration) -> Self {
        Self {
            step: step.clamp(1, PROGRESS_COMPLETE),
            tick: tick.max(MIN_TICK),
            current: None,
        }
    }

    /// Creates an emitter from configuration
    pub fn from_config(config: &ProgressConfig) -> Self {
        Self::new(config.step, Duration::from_millis(config.tick_interval_ms))
    }

    /// Starts a new run, cancelling any run still in flight
    ///
    /// Returns a receiver observing this run's progress values.
    pub fn start<F>(&mut self, on_complete: F) -> watch::Receiver<u8>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.cancel() {
            tracing::debug!("Cancelled previous progress run before restart");
        }

        let (tx, rx) = watch::channel(0u8);
        let token = CancellationToken::new();
        let run_token = token.clone();
        let step = self.step;
        let tick = self.tick;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // The first tick of an interval completes immediately.
            interval.tick().await;

            let mut value = 0u8;
            loop {
                tokio::select! {
                    biased;

                    _ = run_token.cancelled() => {
                        tracing::debug!(progress = value, "Progress run cancelled");
                        return;
                    }

                    _ = interval.tick() => {
                        value = value.saturating_add(step).min(PROGRESS_COMPLETE);
                        tx.send_replace(value);
                        if value >= PROGRESS_COMPLETE {
                            break;
                        }
                    }
                }
            }

            if !run_token.is_cancelled() {
                tracing::debug!("Progress run complete");
                on_complete();
            }
        });

        self.current = Some(ProgressRun {
            token,
            handle,
            updates: rx.clone(),
        });
        rx
    }

    /// Cancels the run in flight, returning true if one was still running
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(run) => {
                let was_running = !run.handle.is_finished();
                run.stop();
                was_running
            }
            None => false,
        }
    }

    /// True while a run has not yet completed or been cancelled
    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .map_or(false, |run| !run.handle.is_finished())
    }

    /// Latest value of the current run, if a run was started
    pub fn current(&self) -> Option<u8> {
        self.current.as_ref().map(|run| *run.updates.borrow())
    }

    /// A fresh receiver for the current run, if any
    pub fn subscribe(&self) -> Option<watch::Receiver<u8>> {
        self.current.as_ref().map(|run| run.updates.clone())
    }
}

impl Drop for ProgressEmitter {
    fn drop(&mut self) {
        if let Some(run) = self.current.take() {
            run.stop();
        }
    }
}

impl std::fmt::Debug for ProgressEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressEmitter")
            .field("step", &self.step)
            .field("tick", &self.tick)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes_once_at_100() {
        let mut emitter = ProgressEmitter::new(5, Duration::from_millis(100));
        let calls = counter();
        let (done_tx, done_rx) = oneshot::channel();

        let calls_in_run = Arc::clone(&calls);
        let updates = emitter.start(move || {
            calls_in_run.fetch_add(1, Ordering::SeqCst);
            let _ = done_tx.send(());
        });

        done_rx.await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*updates.borrow(), PROGRESS_COMPLETE);
        assert_eq!(emitter.current(), Some(PROGRESS_COMPLETE));
        assert!(!emitter.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_takes_twenty_ticks_by_default() {
        let mut emitter = ProgressEmitter::new(5, Duration::from_millis(100));
        let (done_tx, done_rx) = oneshot::channel();
        let started = tokio::time::Instant::now();

        emitter.start(move || {
            let _ = done_tx.send(());
        });
        done_rx.await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_increase_monotonically() {
        let mut emitter = ProgressEmitter::new(30, Duration::from_millis(10));
        let mut updates = emitter.start(|| {});

        let mut seen = Vec::new();
        while updates.changed().await.is_ok() {
            seen.push(*updates.borrow_and_update());
            if seen.last() == Some(&PROGRESS_COMPLETE) {
                break;
            }
        }

        assert_eq!(seen, vec![30, 60, 90, 100]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_callback() {
        let mut emitter = ProgressEmitter::new(5, Duration::from_millis(100));
        let calls = counter();
        let calls_in_run = Arc::clone(&calls);
        let updates = emitter.start(move || {
            calls_in_run.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(emitter.is_running());
        assert!(emitter.cancel());
        let at_cancel = *updates.borrow();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(at_cancel < PROGRESS_COMPLETE);
        assert_eq!(*updates.borrow(), at_cancel);
        assert!(!emitter.is_running());
        assert!(!emitter.cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_previous_run() {
        let mut emitter = ProgressEmitter::new(10, Duration::from_millis(100));
        let first = counter();
        let second = counter();

        let first_in_run = Arc::clone(&first);
        emitter.start(move || {
            first_in_run.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(350)).await;

        let (done_tx, done_rx) = oneshot::channel();
        let second_in_run = Arc::clone(&second);
        emitter.start(move || {
            second_in_run.fetch_add(1, Ordering::SeqCst);
            let _ = done_tx.send(());
        });
        done_rx.await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_run() {
        let calls = counter();
        {
            let mut emitter = ProgressEmitter::new(5, Duration::from_millis(100));
            let calls_in_run = Arc::clone(&calls);
            emitter.start(move || {
                calls_in_run.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let emitter = ProgressEmitter::new(0, Duration::from_millis(1));
        assert_eq!(emitter.step, 1);
        assert!(emitter.current().is_none());
        assert!(emitter.subscribe().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tick_is_clamped_and_run_completes() {
        let mut emitter = ProgressEmitter::new(25, Duration::ZERO);
        assert_eq!(emitter.tick, MIN_TICK);

        let (done_tx, done_rx) = oneshot::channel();
        let updates = emitter.start(move || {
            let _ = done_tx.send(());
        });

        done_rx.await.unwrap();
        assert_eq!(*updates.borrow(), PROGRESS_COMPLETE);
    }
}
