//! Create/edit form state.
//!
//! The editor turns typed text into a store action. It owns no items; the
//! item being edited is a copy taken when the form opened.

use crate::types::{TodoAction, TodoId, TodoItem};
use std::time::Duration;
use todo_master_core::environment::Clock;

/// Latency renderers may add before applying a submitted draft
pub const SUBMIT_DELAY: Duration = Duration::from_millis(200);

/// Trimmed, non-empty form text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft(String);

impl Draft {
    /// Trim `text`; `None` if nothing is left
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The trimmed text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the draft
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// What the form is doing
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// No form shown
    #[default]
    Closed,
    /// Form for a new item
    Creating,
    /// Form for an existing item
    Editing(TodoItem),
}

/// Form state for creating and editing items
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Editor {
    mode: EditorMode,
    submitting: bool,
}

impl Editor {
    /// A closed editor
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Whether the form is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.mode, EditorMode::Closed)
    }

    /// Whether a submit is in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Open an empty form
    pub fn open_create(&mut self) {
        self.mode = EditorMode::Creating;
        self.submitting = false;
    }

    /// Open the form pre-filled with `item`
    pub fn open_edit(&mut self, item: TodoItem) {
        self.mode = EditorMode::Editing(item);
        self.submitting = false;
    }

    /// Close without saving
    pub fn cancel(&mut self) {
        self.mode = EditorMode::Closed;
        self.submitting = false;
    }

    /// Dialog title, `None` when closed
    #[must_use]
    pub const fn title(&self) -> Option<&'static str> {
        match self.mode {
            EditorMode::Closed => None,
            EditorMode::Creating => Some("Create New Todo"),
            EditorMode::Editing(_) => Some("Edit Todo"),
        }
    }

    /// Input placeholder, `None` when closed
    #[must_use]
    pub const fn placeholder(&self) -> Option<&'static str> {
        match self.mode {
            EditorMode::Closed => None,
            EditorMode::Creating => Some("What needs to be done?"),
            EditorMode::Editing(_) => Some("Update your todo..."),
        }
    }

    /// Text the input starts with
    #[must_use]
    pub fn initial_text(&self) -> &str {
        match &self.mode {
            EditorMode::Editing(item) => &item.text,
            EditorMode::Closed | EditorMode::Creating => "",
        }
    }

    /// Validate `text` and mark the form as submitting
    ///
    /// Returns `None` when the form is closed, a submit is already in flight,
    /// or the text is blank.
    pub fn begin_submit(&mut self, text: &str) -> Option<Draft> {
        if !self.is_open() || self.submitting {
            return None;
        }
        let draft = Draft::parse(text)?;
        self.submitting = true;
        Some(draft)
    }

    /// Build the store action for `draft` and close the form
    ///
    /// New items get a millisecond timestamp from `clock` as their id.
    pub fn finish_submit(&mut self, draft: Draft, clock: &impl Clock) -> Option<TodoAction> {
        let mode = std::mem::take(&mut self.mode);
        self.submitting = false;

        match mode {
            EditorMode::Closed => None,
            EditorMode::Creating => {
                let id = TodoId(clock.now().timestamp_millis());
                Some(TodoAction::Create {
                    item: TodoItem::new(id, draft.into_inner()),
                })
            },
            EditorMode::Editing(item) => Some(TodoAction::Update {
                item: item.with_text(draft.into_inner()),
            }),
        }
    }

    /// Validate and build the action in one step
    pub fn submit(&mut self, text: &str, clock: &impl Clock) -> Option<TodoAction> {
        let draft = self.begin_submit(text)?;
        self.finish_submit(draft, clock)
    }
}
