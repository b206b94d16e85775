//! Derived list projections over the note store.
//!
//! # Responsibility
//! - Filter notes by a free-text search and order them for display.
//! - Cache the derived list and recompute only when an input changed.
//!
//! # Invariants
//! - Projection never mutates the store.
//! - Ordering is a single stable pass over a mixed key (title or due date).

mod projection;

pub use projection::{matches_search, project, sort_key, Projection};

use serde::{Deserialize, Serialize};

/// Display ordering selected by the sort toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Every note sorts by title.
    #[default]
    Title,
    /// Tasks sort by due date; other notes still sort by title.
    TaskDueDate,
}

impl SortMode {
    /// Maps the "sort by task due date" toggle to a mode.
    pub fn from_flag(sort_by_task_due_date: bool) -> Self {
        if sort_by_task_due_date {
            Self::TaskDueDate
        } else {
            Self::Title
        }
    }

    pub fn is_task_due_date(self) -> bool {
        self == Self::TaskDueDate
    }
}

/// Inputs of one projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search_text: String,
    pub sort_mode: SortMode,
}

impl ViewQuery {
    pub fn new(search_text: impl Into<String>, sort_mode: SortMode) -> Self {
        Self {
            search_text: search_text.into(),
            sort_mode,
        }
    }
}
