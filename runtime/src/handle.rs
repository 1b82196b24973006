//! Completion tracking for effects.
//!
//! Each `send` gets its own counter of running effects. Spawned effect
//! tasks hold an [`InFlight`] guard that keeps both that counter and the
//! store-wide one raised until the task ends, panics included.

use crate::StoreError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Number of effects still running, observable by waiters
pub(crate) type Counter = Arc<watch::Sender<usize>>;

pub(crate) fn counter() -> Counter {
    Arc::new(watch::Sender::new(0))
}

/// Resolve once the observed count is zero
///
/// A closed sender means every guard is gone, so the count is zero too.
pub(crate) async fn drained(running: &mut watch::Receiver<usize>) {
    loop {
        let count = *running.borrow_and_update();
        if count == 0 || running.changed().await.is_err() {
            return;
        }
    }
}

/// Waits for the effects started by one `send`
///
/// Completion includes reducing whatever action an effect produced, so
/// state read after [`wait`](Self::wait) reflects the effects' results.
#[derive(Clone)]
pub struct EffectHandle {
    running: watch::Receiver<usize>,
}

impl EffectHandle {
    pub(crate) fn track() -> (Self, Counter) {
        let counter = counter();
        let handle = Self {
            running: counter.subscribe(),
        };
        (handle, counter)
    }

    /// A handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        Self::track().0
    }

    /// Effects of this action that have not finished
    #[must_use]
    pub fn pending(&self) -> usize {
        *self.running.borrow()
    }

    /// Wait until every effect has finished
    pub async fn wait(&mut self) {
        drained(&mut self.running).await;
    }

    /// [`wait`](Self::wait) with a deadline
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running after
    /// `timeout`.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Raises the per-action and store-wide counters for its lifetime
pub(crate) struct InFlight {
    action: Counter,
    store: Counter,
}

impl InFlight {
    pub(crate) fn enter(action: &Counter, store: &Counter) -> Self {
        action.send_modify(|n| *n += 1);
        store.send_modify(|n| *n += 1);
        Self {
            action: Arc::clone(action),
            store: Arc::clone(store),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.action.send_modify(|n| *n = n.saturating_sub(1));
        self.store.send_modify(|n| *n = n.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_handle_returns_at_once() {
        let mut handle = EffectHandle::completed();
        assert_eq!(handle.pending(), 0);
        tokio_test::assert_ok!(handle.wait_with_timeout(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_guard_releases_on_drop() {
        let (mut handle, action) = EffectHandle::track();
        let store = counter();

        let guard = InFlight::enter(&action, &store);
        assert_eq!(handle.pending(), 1);
        assert_eq!(*store.borrow(), 1);

        let waited = handle.wait_with_timeout(Duration::from_millis(10)).await;
        assert_eq!(waited, Err(StoreError::Timeout));

        drop(guard);
        tokio_test::assert_ok!(handle.wait_with_timeout(Duration::from_millis(10)).await);
        assert_eq!(*store.borrow(), 0);
    }

    #[tokio::test]
    #[allow(clippy::panic)] // Tests are allowed to panic on failures
    async fn test_guard_released_when_task_panics() {
        let (mut handle, action) = EffectHandle::track();
        let store = counter();
        let guard = InFlight::enter(&action, &store);

        let task = tokio::spawn(async move {
            let _guard = guard;
            panic!("effect blew up");
        });
        assert!(task.await.is_err());

        tokio_test::assert_ok!(handle.wait_with_timeout(Duration::from_millis(50)).await);
    }
}
