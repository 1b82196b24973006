//! View projection: what the user currently sees.
//!
//! Everything here is a pure function of the collection plus two transient
//! display inputs, a search term and a [`FilterMode`]. Counts and progress
//! are computed from the whole collection, never from the filtered view.

use crate::error::ParseFilterModeError;
use crate::types::TodoItem;
use std::fmt;
use std::str::FromStr;

/// Completion-status filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Every item
    #[default]
    All,
    /// Items not yet completed
    Active,
    /// Completed items
    Completed,
}

impl FilterMode {
    /// All modes in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Short label shown on the filter control
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Done",
        }
    }

    /// Whether an item with this completion flag passes the filter
    #[must_use]
    pub const fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        })
    }
}

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseFilterModeError(s.to_string())),
        }
    }
}

/// The two display inputs, owned by the presentation layer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Case-insensitive substring to look for
    pub search_term: String,
    /// Completion filter
    pub filter: FilterMode,
}

impl ViewQuery {
    /// Query with the given term and filter
    #[must_use]
    pub fn new(search_term: impl Into<String>, filter: FilterMode) -> Self {
        Self {
            search_term: search_term.into(),
            filter,
        }
    }

    /// Project `items` through this query
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [TodoItem]) -> Projection<'a> {
        Projection::new(items, &self.search_term, self.filter)
    }
}

/// Case-insensitive substring test; an empty term matches everything
#[must_use]
pub fn matches_search(text: &str, search_term: &str) -> bool {
    text.to_lowercase().contains(&search_term.to_lowercase())
}

/// Items whose text contains `search_term` and that pass `filter`
///
/// Keeps the collection's order.
#[must_use]
pub fn project<'a>(items: &'a [TodoItem], search_term: &str, filter: FilterMode) -> Vec<&'a TodoItem> {
    items
        .iter()
        .filter(|item| filter.matches(item.completed) && matches_search(&item.text, search_term))
        .collect()
}

/// Size of the whole collection
#[must_use]
pub const fn total_count(items: &[TodoItem]) -> usize {
    items.len()
}

/// Completed items in the whole collection
#[must_use]
pub fn completed_count(items: &[TodoItem]) -> usize {
    items.iter().filter(|item| item.completed).count()
}

/// `completed / total * 100`, or `0` for an empty collection
#[must_use]
#[allow(clippy::cast_precision_loss)] // collection sizes stay far below 2^52
pub fn progress_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Header line above the list
#[must_use]
pub fn headline(completed: usize, total: usize) -> String {
    if total == 0 {
        "Start organizing your day".to_string()
    } else {
        format!("{completed} of {total} tasks completed")
    }
}

/// What the list area shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListStatus {
    /// The collection itself is empty
    NoTodos,
    /// Items exist but none pass the search and filter
    NoMatches,
    /// This many rows are visible
    Showing(usize),
}

impl ListStatus {
    /// Placeholder text, `None` when rows are shown
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::NoTodos => Some("No todos yet"),
            Self::NoMatches => Some("No todos match your current filter"),
            Self::Showing(_) => None,
        }
    }

    /// Secondary placeholder text
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NoTodos => Some("Create your first todo to get started!"),
            Self::NoMatches | Self::Showing(_) => None,
        }
    }
}

/// One rendered frame's worth of derived data
#[derive(Clone, Debug, PartialEq)]
pub struct Projection<'a> {
    /// Items passing search and filter, in collection order
    pub visible: Vec<&'a TodoItem>,
    /// Size of the whole collection
    pub total_count: usize,
    /// Completed items in the whole collection
    pub completed_count: usize,
}

impl<'a> Projection<'a> {
    /// Derive everything the list needs from `items`
    #[must_use]
    pub fn new(items: &'a [TodoItem], search_term: &str, filter: FilterMode) -> Self {
        Self {
            visible: project(items, search_term, filter),
            total_count: total_count(items),
            completed_count: completed_count(items),
        }
    }

    /// Completion percentage over the whole collection
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.completed_count, self.total_count)
    }

    /// Header line
    #[must_use]
    pub fn headline(&self) -> String {
        headline(self.completed_count, self.total_count)
    }

    /// What the list area shows
    #[must_use]
    pub fn status(&self) -> ListStatus {
        if self.total_count == 0 {
            ListStatus::NoTodos
        } else if self.visible.is_empty() {
            ListStatus::NoMatches
        } else {
            ListStatus::Showing(self.visible.len())
        }
    }
}
