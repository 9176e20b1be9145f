use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::{BooklogError, Result};

/// Delivers the latest pushed value once no newer value has arrived for
/// `delay`.
///
/// Each `push` cancels the pending delivery and schedules a new one, so
/// only the final value of a burst is ever published. Subscribers start
/// with the initial value and never observe a value before its window
/// has elapsed.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    runtime: Handle,
    tx: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Send + Sync + 'static,
{
    /// Must be called from within a Tokio runtime.
    pub fn new(initial: T, delay: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| BooklogError::MissingRuntime)?;
        let (tx, _rx) = watch::channel(initial);
        Ok(Self {
            delay,
            runtime,
            tx: Arc::new(tx),
            pending: None,
        })
    }

    pub fn push(&mut self, value: T) {
        self.cancel();

        let deadline = Instant::now() + self.delay;
        let tx = Arc::clone(&self.tx);
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            tx.send_replace(value);
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout};

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_requires_runtime() {
        assert!(matches!(
            Debouncer::new(0u32, WINDOW),
            Err(BooklogError::MissingRuntime)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_only_last_value_after_window() {
        let mut debouncer = Debouncer::new(0u32, WINDOW).unwrap();
        let mut rx = debouncer.subscribe();

        for value in 1..=5 {
            debouncer.push(value);
            if value < 5 {
                sleep(Duration::from_millis(100)).await;
            }
        }
        let last_push = Instant::now();
        assert_eq!(*rx.borrow(), 0);

        rx.changed().await.unwrap();
        let elapsed = last_push.elapsed();
        assert_eq!(*rx.borrow_and_update(), 5);
        assert!(elapsed >= WINDOW, "emitted early after {elapsed:?}");
        assert!(elapsed < WINDOW + Duration::from_millis(10), "emitted late after {elapsed:?}");

        assert!(timeout(Duration::from_secs(5), rx.changed()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_spaced_beyond_window_all_emit() {
        let mut debouncer = Debouncer::new(0u32, WINDOW).unwrap();
        let mut rx = debouncer.subscribe();

        debouncer.push(1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        debouncer.push(2);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_never_ahead_of_window() {
        let mut debouncer = Debouncer::new("old", WINDOW).unwrap();
        let rx = debouncer.subscribe();

        debouncer.push("new");
        sleep(WINDOW - Duration::from_millis(1)).await;
        assert_eq!(*rx.borrow(), "old");
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*rx.borrow(), "new");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new(0u32, WINDOW).unwrap();
        let mut rx = debouncer.subscribe();

        debouncer.push(7);
        debouncer.cancel();
        assert!(timeout(WINDOW * 4, rx.changed()).await.is_err());
        assert_eq!(*rx.borrow(), 0);
    }
}
