//! Per-row view state.
//!
//! A rendered row guards its own toggle and delete buttons against repeat
//! clicks while the delayed action is pending. This state belongs to the
//! row, never to the item store.

use crate::types::{TodoAction, TodoId};
use std::time::Duration;

/// Delay before a toggle reaches the store
pub const TOGGLE_DELAY: Duration = Duration::from_millis(150);

/// Delay before a delete reaches the store
pub const DELETE_DELAY: Duration = Duration::from_millis(200);

/// A store action to apply after a delay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowCommit {
    /// Action for the store
    pub action: TodoAction,
    /// How long to wait before sending it
    pub delay: Duration,
}

/// Pending-request flags of one row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowState {
    toggling: bool,
    deleting: bool,
}

impl RowState {
    /// A row with nothing pending
    #[must_use]
    pub const fn new() -> Self {
        Self {
            toggling: false,
            deleting: false,
        }
    }

    /// Request a toggle; `None` if one is already pending
    pub fn request_toggle(&mut self, id: TodoId) -> Option<RowCommit> {
        if self.toggling {
            return None;
        }
        self.toggling = true;
        Some(RowCommit {
            action: TodoAction::Toggle { id },
            delay: TOGGLE_DELAY,
        })
    }

    /// The toggle reached the store
    pub fn toggle_committed(&mut self) {
        self.toggling = false;
    }

    /// Request a delete; `None` if one is already pending
    ///
    /// The flag is never cleared: once the delete lands the row is gone.
    pub fn request_delete(&mut self, id: TodoId) -> Option<RowCommit> {
        if self.deleting {
            return None;
        }
        self.deleting = true;
        Some(RowCommit {
            action: TodoAction::Delete { id },
            delay: DELETE_DELAY,
        })
    }

    /// A toggle is pending
    #[must_use]
    pub const fn is_toggling(&self) -> bool {
        self.toggling
    }

    /// A delete is pending
    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Either request is pending
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.toggling || self.deleting
    }
}
