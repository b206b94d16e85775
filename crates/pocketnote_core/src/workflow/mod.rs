//! Create and edit workflows for a single note.
//!
//! # Responsibility
//! - Model the create dialog (`NoteComposer`) and the edit dialog
//!   (`NoteEditor`) as explicit state machines.
//! - Enforce boundary validation before any store mutation.
//!
//! # Invariants
//! - A refused commit/save leaves the store untouched and the workflow open.
//! - The pending attachment buffer belongs to one composer and is cleared
//!   when that composer commits or cancels.
//! - Operations on a closed workflow return `WorkflowError::Closed`.

use crate::media::CaptureError;
use crate::model::note::{NoteId, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod composer;
mod editor;

pub use composer::{ComposerState, NoteComposer};
pub use editor::{EditOutcome, EditorState, NoteEditor};

/// Error for workflow operations.
#[derive(Debug)]
pub enum WorkflowError {
    /// Title or description is blank.
    Validation(NoteValidationError),
    /// The workflow already reached a terminal state, or none is open.
    Closed,
    /// The note to edit is not in the store.
    NoteMissing(NoteId),
    /// A capture request was abandoned.
    Capture(CaptureError),
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "workflow is not open"),
            Self::NoteMissing(id) => write!(f, "note not found: {id}"),
            Self::Capture(err) => write!(f, "capture did not happen: {err}"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Capture(err) => Some(err),
            Self::Closed | Self::NoteMissing(_) => None,
        }
    }
}

impl From<NoteValidationError> for WorkflowError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CaptureError> for WorkflowError {
    fn from(value: CaptureError) -> Self {
        Self::Capture(value)
    }
}
