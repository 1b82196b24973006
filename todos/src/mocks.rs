//! Mock seed loaders for tests and demos.

use crate::error::SeedFetchError;
use crate::loader::SeedLoader;
use crate::types::{TodoId, TodoItem};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Three items used across the tests: two matching "buy", one completed.
#[must_use]
pub fn sample_todos() -> Vec<TodoItem> {
    vec![
        TodoItem::new(TodoId(1), "Buy milk"),
        TodoItem::new(TodoId(2), "Buy eggs").with_completed(true),
        TodoItem::new(TodoId(3), "Call mom"),
    ]
}

/// Seed loader returning a fixed collection
///
/// Counts calls so tests can check the fetch runs once.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedLoader {
    items: Vec<TodoItem>,
    calls: Arc<AtomicUsize>,
}

impl StaticSeedLoader {
    /// Loader that succeeds with `items`
    #[must_use]
    pub fn new(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times the seed was fetched
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SeedLoader for StaticSeedLoader {
    fn fetch_seed_todos(&self) -> impl Future<Output = Result<Vec<TodoItem>, SeedFetchError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let items = self.items.clone();
        async move { Ok(items) }
    }
}

/// Seed loader that always fails
#[derive(Debug, Clone)]
pub struct FailingSeedLoader {
    error: SeedFetchError,
}

impl FailingSeedLoader {
    /// Loader failing with a 503
    #[must_use]
    pub const fn new() -> Self {
        Self::with_error(SeedFetchError::Status { status: 503 })
    }

    /// Loader failing with `error`
    #[must_use]
    pub const fn with_error(error: SeedFetchError) -> Self {
        Self { error }
    }
}

impl Default for FailingSeedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedLoader for FailingSeedLoader {
    fn fetch_seed_todos(&self) -> impl Future<Output = Result<Vec<TodoItem>, SeedFetchError>> + Send {
        let error = self.error.clone();
        async move { Err(error) }
    }
}

/// Seed loader whose fetch never completes
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingSeedLoader;

impl SeedLoader for PendingSeedLoader {
    fn fetch_seed_todos(&self) -> impl Future<Output = Result<Vec<TodoItem>, SeedFetchError>> + Send {
        std::future::pending()
    }
}
