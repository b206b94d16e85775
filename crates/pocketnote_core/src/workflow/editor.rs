use crate::model::note::{NoteFields, NoteId};
use crate::store::NoteStore;
use crate::workflow::WorkflowError;
use log::{debug, info, warn};

/// Lifecycle of one edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Editing,
    Saved,
    Deleted,
    Cancelled,
}

/// Result of a save or delete that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved(NoteId),
    Deleted(NoteId),
    /// The note vanished before the action; nothing changed.
    TargetMissing(NoteId),
}

/// Edit-note workflow over editable copies of one stored note.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    id: NoteId,
    fields: NoteFields,
    state: EditorState,
}

impl NoteEditor {
    /// Loads editable copies of the note stored under `id`.
    pub fn open(store: &NoteStore, id: NoteId) -> Result<Self, WorkflowError> {
        let note = store.get(id).ok_or(WorkflowError::NoteMissing(id))?;
        Ok(Self {
            id,
            fields: note.fields(),
            state: EditorState::Editing,
        })
    }

    pub fn note_id(&self) -> NoteId {
        self.id
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditorState::Editing
    }

    pub fn fields(&self) -> &NoteFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> Result<&mut NoteFields, WorkflowError> {
        self.ensure_editing()?;
        Ok(&mut self.fields)
    }

    pub fn set_fields(&mut self, fields: NoteFields) -> Result<(), WorkflowError> {
        *self.fields_mut()? = fields;
        Ok(())
    }

    /// Writes the edited fields back, keeping reminders and attachments.
    ///
    /// # Errors
    /// - `WorkflowError::Validation` when title or description is blank; the
    ///   editor stays open.
    /// - `WorkflowError::Closed` when the editor already finished.
    pub fn save(&mut self, store: &mut NoteStore) -> Result<EditOutcome, WorkflowError> {
        self.ensure_editing()?;
        if let Err(err) = self.fields.validate() {
            debug!("event=note_save module=workflow status=rejected reason={err}");
            return Err(err.into());
        }

        let Some(current) = store.get(self.id) else {
            return Ok(self.target_missing());
        };
        let updated = current.apply_fields(&self.fields);
        if store.update(self.id, updated).is_err() {
            return Ok(self.target_missing());
        }
        self.state = EditorState::Saved;
        info!("event=note_save module=workflow status=ok id={}", self.id);
        Ok(EditOutcome::Saved(self.id))
    }

    /// Removes the note from `store`; a note already gone is a no-op.
    pub fn delete(&mut self, store: &mut NoteStore) -> Result<EditOutcome, WorkflowError> {
        self.ensure_editing()?;
        if store.remove(self.id).is_none() {
            return Ok(self.target_missing());
        }
        self.state = EditorState::Deleted;
        info!("event=note_delete module=workflow status=ok id={}", self.id);
        Ok(EditOutcome::Deleted(self.id))
    }

    /// Discards edits without touching the store.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        self.ensure_editing()?;
        self.state = EditorState::Cancelled;
        Ok(())
    }

    fn target_missing(&mut self) -> EditOutcome {
        warn!("event=note_edit module=workflow status=missing id={}", self.id);
        self.state = EditorState::Cancelled;
        EditOutcome::TargetMissing(self.id)
    }

    fn ensure_editing(&self) -> Result<(), WorkflowError> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(WorkflowError::Closed)
        }
    }
}
