//! Reducer logic for the item store.
//!
//! The store holds the canonical collection. It is seeded once by an async
//! fetch and then only changes through create, update, delete and toggle.
//! Mutations on an id that is not in the collection are silent no-ops.

use crate::loader::SeedLoader;
use crate::types::{LOAD_ERROR_MESSAGE, TodoAction, TodoId, TodoItem, TodoState};
use std::marker::PhantomData;
use std::sync::Arc;
use todo_master_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment dependencies for the item store
pub struct TodoEnvironment<L> {
    /// Source of the seed collection
    pub loader: Arc<L>,
}

impl<L> TodoEnvironment<L> {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader: Arc::new(loader),
        }
    }

    /// Creates a `TodoEnvironment` sharing an existing loader
    #[must_use]
    pub const fn from_shared(loader: Arc<L>) -> Self {
        Self { loader }
    }
}

impl<L> Clone for TodoEnvironment<L> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
        }
    }
}

/// Reducer for the item store
///
/// Generic over the loader type so the environment stays statically typed.
pub struct TodoReducer<L> {
    _loader: PhantomData<fn() -> L>,
}

impl<L> TodoReducer<L> {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _loader: PhantomData,
        }
    }

    fn create(state: &mut TodoState, item: TodoItem) {
        state.items.push(item);
    }

    fn update(state: &mut TodoState, item: TodoItem) {
        match state.items.iter_mut().find(|t| t.id == item.id) {
            Some(slot) => *slot = item,
            None => tracing::debug!(id = %item.id, "Update ignored: unknown todo"),
        }
    }

    fn delete(state: &mut TodoState, id: TodoId) {
        let before = state.items.len();
        state.items.retain(|t| t.id != id);

        if state.items.len() == before {
            tracing::debug!(%id, "Delete ignored: unknown todo");
        }
    }

    fn toggle(state: &mut TodoState, id: TodoId) {
        match state.items.iter_mut().find(|t| t.id == id) {
            Some(todo) => todo.completed = !todo.completed,
            None => tracing::debug!(%id, "Toggle ignored: unknown todo"),
        }
    }
}

impl<L> Default for TodoReducer<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Clone for TodoReducer<L> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<L> std::fmt::Debug for TodoReducer<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TodoReducer")
    }
}

impl<L> Reducer for TodoReducer<L>
where
    L: SeedLoader + 'static,
{
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment<L>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Initialize => {
                if state.seed_requested {
                    tracing::debug!("Seed fetch already requested, ignoring Initialize");
                    return SmallVec::new();
                }

                state.seed_requested = true;
                state.is_loading = true;
                state.items.clear();
                state.load_error = None;

                let loader = Arc::clone(&env.loader);
                smallvec![Effect::Future(Box::pin(async move {
                    match loader.fetch_seed_todos().await {
                        Ok(items) => Some(TodoAction::SeedLoaded { items }),
                        Err(error) => Some(TodoAction::SeedFailed {
                            reason: error.to_string(),
                        }),
                    }
                }))]
            },

            TodoAction::SeedLoaded { items } => {
                tracing::info!(count = items.len(), "Seed todos loaded");
                state.items = items;
                state.is_loading = false;
                state.load_error = None;
                SmallVec::new()
            },

            TodoAction::SeedFailed { reason } => {
                tracing::warn!(%reason, "Seed fetch failed");
                state.is_loading = false;
                state.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
                SmallVec::new()
            },

            TodoAction::Create { item } => {
                Self::create(state, item);
                SmallVec::new()
            },

            TodoAction::Update { item } => {
                Self::update(state, item);
                SmallVec::new()
            },

            TodoAction::Delete { id } => {
                Self::delete(state, id);
                SmallVec::new()
            },

            TodoAction::Toggle { id } => {
                Self::toggle(state, id);
                SmallVec::new()
            },
        }
    }
}
