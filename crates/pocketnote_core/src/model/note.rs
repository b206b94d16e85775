//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by list, create and edit views.
//! - Define the editable field subset and its boundary validation.
//!
//! # Invariants
//! - `id` is stable for the whole note lifetime and never reused.
//! - `due_date` is meaningful only when `is_task == true`; the boundary
//!   helpers never produce a due date for a plain note.
//! - Blank title/description is rejected at create/edit time, not here.

use crate::model::media::MediaAttachment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note held by the store.
pub type NoteId = Uuid;

/// Validation failure for note input coming from create/edit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// A caller-provided id was the nil UUID.
    NilId,
    /// Title is empty or whitespace-only.
    BlankTitle,
    /// Description is empty or whitespace-only.
    BlankDescription,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
            Self::BlankTitle => write!(f, "note title must not be blank"),
            Self::BlankDescription => write!(f, "note description must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// A user-created record, optionally flagged as a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    pub is_task: bool,
    /// Free-form date string, compared lexicographically when sorting.
    pub due_date: Option<String>,
    #[serde(default)]
    pub reminders: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<MediaAttachment>,
}

impl Note {
    /// Creates a plain (non-task) note with a generated stable id.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            is_task: false,
            due_date: None,
            reminders: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Creates a note with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `NoteValidationError::NilId` for `Uuid::nil()`.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, NoteValidationError> {
        if id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        let mut note = Self::new(title, description);
        note.id = id;
        Ok(note)
    }

    /// Marks this note as a task with an optional due date.
    pub fn as_task(mut self, due_date: Option<String>) -> Self {
        self.is_task = true;
        self.due_date = due_date;
        self
    }

    pub fn with_reminders(mut self, reminders: Vec<String>) -> Self {
        self.reminders = reminders;
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<MediaAttachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Returns a copy with the form-editable fields replaced.
    ///
    /// `id`, `reminders` and `attachments` are carried over unchanged.
    pub fn apply_fields(&self, fields: &NoteFields) -> Self {
        Self {
            id: self.id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            is_task: fields.is_task,
            due_date: fields.normalized_due_date(),
            reminders: self.reminders.clone(),
            attachments: self.attachments.clone(),
        }
    }

    /// Loads the editable subset of this note.
    ///
    /// A missing due date becomes an empty string, as shown by the edit form.
    pub fn fields(&self) -> NoteFields {
        NoteFields {
            title: self.title.clone(),
            description: self.description.clone(),
            is_task: self.is_task,
            due_date: self.due_date.clone().unwrap_or_default(),
        }
    }
}

/// Editable field set used by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFields {
    pub title: String,
    pub description: String,
    pub is_task: bool,
    pub due_date: String,
}

impl NoteFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Checks that title and description are both non-blank.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::BlankTitle);
        }
        if self.description.trim().is_empty() {
            return Err(NoteValidationError::BlankDescription);
        }
        Ok(())
    }

    /// Due date to persist: present only for tasks with a non-blank value.
    pub fn normalized_due_date(&self) -> Option<String> {
        if self.is_task && !self.due_date.trim().is_empty() {
            Some(self.due_date.clone())
        } else {
            None
        }
    }

    /// Builds a new note from these fields with the given attachments.
    pub fn into_note(self, attachments: Vec<MediaAttachment>) -> Note {
        let due_date = self.normalized_due_date();
        Note {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            is_task: self.is_task,
            due_date,
            reminders: Vec::new(),
            attachments,
        }
    }

    /// Resets every field to its empty value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
