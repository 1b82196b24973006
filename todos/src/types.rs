//! Domain types for the task list.
//!
//! A task list is an ordered collection of [`TodoItem`]s seeded once from a
//! remote source and then edited locally. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Message stored in [`TodoState::load_error`] when the seed fetch fails.
///
/// The underlying failure is logged, never shown.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to fetch todos";

/// Identifier of a todo item
///
/// Seeded items carry the id assigned by the remote source. Locally created
/// items use a timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier within the collection
    pub id: TodoId,
    /// Display text, already trimmed by whoever built the item
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// Opaque owner tag carried through from the remote source
    pub owner_tag: i64,
}

impl TodoItem {
    /// Creates an active item with owner tag `0`
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            owner_tag: 0,
        }
    }

    /// Sets the completion flag
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Sets the owner tag
    #[must_use]
    pub fn with_owner_tag(mut self, owner_tag: i64) -> Self {
        self.owner_tag = owner_tag;
        self
    }

    /// Same item with different text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// State of the item store
///
/// `items` keeps insertion order: seeded items first, local creations appended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// The canonical collection
    pub items: Vec<TodoItem>,
    /// True while the seed fetch is in flight
    pub is_loading: bool,
    /// Set when the seed fetch failed
    pub load_error: Option<String>,
    /// The seed fetch has been started; it never runs twice
    pub seed_requested: bool,
}

impl TodoState {
    /// Creates an empty state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            load_error: None,
            seed_requested: false,
        }
    }

    /// Creates a state holding `items`, as if already seeded
    #[must_use]
    pub const fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            is_loading: false,
            load_error: None,
            seed_requested: true,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// The seed fetch finished, successfully or not
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.seed_requested && !self.is_loading
    }
}

/// Everything the item store reacts to
///
/// `Initialize` and the four mutations come from the presentation layer;
/// `SeedLoaded` and `SeedFailed` are produced by the seed fetch effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Start the one-time seed fetch
    Initialize,

    /// Seed fetch succeeded
    SeedLoaded {
        /// Fetched items, replacing the collection
        items: Vec<TodoItem>,
    },

    /// Seed fetch failed
    SeedFailed {
        /// Failure detail, logged only
        reason: String,
    },

    /// Append an item
    Create {
        /// Item to append
        item: TodoItem,
    },

    /// Replace the item with the same id, in place
    Update {
        /// Replacement item
        item: TodoItem,
    },

    /// Remove the item with this id
    Delete {
        /// Todo to delete
        id: TodoId,
    },

    /// Flip the completion flag of the item with this id
    Toggle {
        /// Todo to toggle
        id: TodoId,
    },
}

impl TodoAction {
    /// True for the actions that end the seed fetch
    #[must_use]
    pub const fn is_seed_result(&self) -> bool {
        matches!(self, Self::SeedLoaded { .. } | Self::SeedFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_item_new_defaults() {
        let item = TodoItem::new(TodoId(7), "Test todo");

        assert_eq!(item.id, TodoId(7));
        assert_eq!(item.text, "Test todo");
        assert!(!item.completed);
        assert_eq!(item.owner_tag, 0);
    }

    #[test]
    fn test_todo_state_counts() {
        let state = TodoState::with_items(vec![
            TodoItem::new(TodoId(1), "a"),
            TodoItem::new(TodoId(2), "b").with_completed(true),
        ]);

        assert_eq!(state.count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert!(state.exists(TodoId(2)));
        assert!(!state.exists(TodoId(3)));
    }

    #[test]
    fn test_new_state_is_not_settled() {
        let state = TodoState::new();
        assert!(!state.is_settled());
        assert!(TodoState::with_items(Vec::new()).is_settled());
    }

    #[test]
    fn test_seed_result_actions() {
        assert!(TodoAction::SeedLoaded { items: vec![] }.is_seed_result());
        assert!(
            TodoAction::SeedFailed {
                reason: "boom".to_string()
            }
            .is_seed_result()
        );
        assert!(!TodoAction::Initialize.is_seed_result());
    }

    #[test]
    fn test_todo_id_display() {
        assert_eq!(TodoId(42).to_string(), "42");
    }
}
