//! The item store as a running [`Store`].
//!
//! [`launch`] wires the reducer to its environment and sends `Initialize`,
//! so the seed fetch starts as soon as the store exists. [`ItemStore`] is the
//! handle presentation code holds: it exposes the state fields and the four
//! mutations, and nothing else.

use crate::loader::SeedLoader;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::row::RowCommit;
use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use std::time::Duration;
use todo_master_runtime::{EffectHandle, Store, StoreError};
use tokio::sync::watch;

/// Store type for the task list
pub type TodoStore<L> = Store<TodoState, TodoAction, TodoEnvironment<L>, TodoReducer<L>>;

/// Build a store and start the seed fetch
///
/// The returned handle completes once the seed result has been reduced.
///
/// # Errors
///
/// Returns [`StoreError`] if the store refuses the `Initialize` action.
pub async fn launch<L>(env: TodoEnvironment<L>) -> Result<(TodoStore<L>, EffectHandle), StoreError>
where
    L: SeedLoader + 'static,
{
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);
    let handle = store.send(TodoAction::Initialize).await?;
    Ok((store, handle))
}

/// Handle to a running item store
pub struct ItemStore<L>
where
    L: SeedLoader + 'static,
{
    inner: TodoStore<L>,
    seed: EffectHandle,
}

impl<L> Clone for ItemStore<L>
where
    L: SeedLoader + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            seed: self.seed.clone(),
        }
    }
}

impl<L> ItemStore<L>
where
    L: SeedLoader + 'static,
{
    /// Construct the store around `loader` and start the seed fetch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the initial action is rejected.
    pub async fn launch(loader: L) -> Result<Self, StoreError> {
        let (inner, seed) = launch(TodoEnvironment::new(loader)).await?;
        Ok(Self { inner, seed })
    }

    /// Wait until the seed fetch has settled, or `timeout` elapses
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the fetch is still running.
    pub async fn wait_for_seed(&self, timeout: Duration) -> Result<(), StoreError> {
        let mut seed = self.seed.clone();
        seed.wait_with_timeout(timeout).await
    }

    /// Latest immutable state
    #[must_use]
    pub fn snapshot(&self) -> Arc<TodoState> {
        self.inner.snapshot()
    }

    /// Receive a new snapshot after every change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<TodoState>> {
        self.inner.subscribe()
    }

    /// Current items
    #[must_use]
    pub fn items(&self) -> Vec<TodoItem> {
        self.snapshot().items.clone()
    }

    /// Whether the seed fetch is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading
    }

    /// Seed failure message, if any
    #[must_use]
    pub fn load_error(&self) -> Option<String> {
        self.snapshot().load_error.clone()
    }

    /// Append `item`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn create(&self, item: TodoItem) -> Result<(), StoreError> {
        self.send(TodoAction::Create { item }).await
    }

    /// Replace the item with the same id
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn update(&self, item: TodoItem) -> Result<(), StoreError> {
        self.send(TodoAction::Update { item }).await
    }

    /// Remove the item with `id`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        self.send(TodoAction::Delete { id }).await
    }

    /// Flip `completed` on the item with `id`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn toggle(&self, id: TodoId) -> Result<(), StoreError> {
        self.send(TodoAction::Toggle { id }).await
    }

    /// Send any action, such as one built by the editor
    ///
    /// The change is applied when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn send(&self, action: TodoAction) -> Result<(), StoreError> {
        self.inner.send(action).await.map(drop)
    }

    /// Wait out a row's delay, then apply its action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store shut down
    /// during the delay.
    pub async fn commit(&self, commit: RowCommit) -> Result<(), StoreError> {
        tokio::time::sleep(commit.delay).await;
        self.send(commit.action).await
    }

    /// Stop accepting actions; an unfinished seed fetch is discarded
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the seed fetch is still running.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.inner.shutdown(timeout).await
    }

    /// The underlying runtime store
    #[must_use]
    pub const fn inner(&self) -> &TodoStore<L> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{StaticSeedLoader, sample_todos};

    #[tokio::test]
    async fn test_launch_starts_loading() -> Result<(), StoreError> {
        let (store, mut seed) =
            launch(TodoEnvironment::new(StaticSeedLoader::new(sample_todos()))).await?;

        assert!(store.snapshot().seed_requested);
        seed.wait().await;

        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.items, sample_todos());
        Ok(())
    }

    #[tokio::test]
    async fn test_mutation_visible_on_return() -> Result<(), StoreError> {
        let store = ItemStore::launch(StaticSeedLoader::new(Vec::new())).await?;
        store.wait_for_seed(Duration::from_secs(1)).await?;

        store.create(TodoItem::new(TodoId(9), "Water plants")).await?;
        assert_eq!(store.items(), vec![TodoItem::new(TodoId(9), "Water plants")]);
        Ok(())
    }
}
