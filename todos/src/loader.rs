//! Remote loader for the seed collection.

use crate::config::SeedConfig;
use crate::error::SeedFetchError;
use crate::types::{TodoId, TodoItem};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;

/// Default collection endpoint host
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default number of seeded items
pub const DEFAULT_SEED_LIMIT: usize = 10;

/// Source of the initial todo collection.
///
/// Injected into the item store through its environment; called at most
/// once per store.
pub trait SeedLoader: Send + Sync {
    /// Fetch the seed collection.
    ///
    /// # Errors
    ///
    /// Returns a [`SeedFetchError`] if the request fails or the response
    /// cannot be read as a todo collection.
    fn fetch_seed_todos(&self) -> impl Future<Output = Result<Vec<TodoItem>, SeedFetchError>> + Send;
}

/// One page of the remote collection
#[derive(Debug, Deserialize)]
struct TodoPage {
    todos: Vec<RemoteTodo>,
}

/// A todo record as served by the remote endpoint
#[derive(Debug, Deserialize)]
struct RemoteTodo {
    id: i64,
    todo: String,
    completed: bool,
    #[serde(rename = "userId")]
    user_id: i64,
}

impl From<RemoteTodo> for TodoItem {
    fn from(remote: RemoteTodo) -> Self {
        Self {
            id: TodoId(remote.id),
            text: remote.todo,
            completed: remote.completed,
            owner_tag: remote.user_id,
        }
    }
}

/// Seed loader backed by a single HTTP GET
///
/// Requests `{base_url}/todos?limit={limit}`. No retries and no timeout.
#[derive(Clone, Debug)]
pub struct HttpSeedLoader {
    client: Client,
    base_url: String,
    limit: usize,
}

impl HttpSeedLoader {
    /// Create a loader for `base_url` fetching at most `limit` items
    #[must_use]
    pub fn new(base_url: impl Into<String>, limit: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            limit,
        }
    }

    /// Create a loader from configuration
    #[must_use]
    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new(config.base_url.clone(), config.limit)
    }

    /// Full request URL
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/todos?limit={}",
            self.base_url.trim_end_matches('/'),
            self.limit
        )
    }
}

impl Default for HttpSeedLoader {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_SEED_LIMIT)
    }
}

impl SeedLoader for HttpSeedLoader {
    fn fetch_seed_todos(&self) -> impl Future<Output = Result<Vec<TodoItem>, SeedFetchError>> + Send {
        let request = self.client.get(self.url());

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| SeedFetchError::Request(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SeedFetchError::Status {
                    status: status.as_u16(),
                });
            }

            let page = response
                .json::<TodoPage>()
                .await
                .map_err(|e| SeedFetchError::Parse(e.to_string()))?;

            tracing::debug!(count = page.todos.len(), "Fetched seed todos");
            Ok(page.todos.into_iter().map(TodoItem::from).collect())
        }
    }
}
