use crate::media::image_file::remove_image_file;
use crate::media::{media_channel, CaptureTarget, MediaEvent, MediaInbox, MediaSender};
use crate::model::media::MediaAttachment;
use crate::model::note::{NoteFields, NoteId};
use crate::store::NoteStore;
use crate::workflow::WorkflowError;
use log::{debug, info};
use std::collections::HashMap;
use std::path::PathBuf;

/// Lifecycle of one create dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Composing,
    Committed(NoteId),
    Cancelled,
}

/// Create-note workflow with its own pending attachment buffer.
#[derive(Debug)]
pub struct NoteComposer {
    state: ComposerState,
    fields: NoteFields,
    pending: Vec<MediaAttachment>,
    captures: HashMap<String, PathBuf>,
    sender: MediaSender,
    inbox: MediaInbox,
}

impl Default for NoteComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteComposer {
    /// Opens a composer with empty fields and an empty buffer.
    pub fn new() -> Self {
        let (sender, inbox) = media_channel();
        Self {
            state: ComposerState::Composing,
            fields: NoteFields::default(),
            pending: Vec::new(),
            captures: HashMap::new(),
            sender,
            inbox,
        }
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn is_composing(&self) -> bool {
        self.state == ComposerState::Composing
    }

    pub fn fields(&self) -> &NoteFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> Result<&mut NoteFields, WorkflowError> {
        self.ensure_composing()?;
        Ok(&mut self.fields)
    }

    pub fn set_fields(&mut self, fields: NoteFields) -> Result<(), WorkflowError> {
        *self.fields_mut()? = fields;
        Ok(())
    }

    /// Completion handle for camera/gallery collaborators.
    pub fn media_sender(&self) -> Result<MediaSender, WorkflowError> {
        self.ensure_composing()?;
        Ok(self.sender.clone())
    }

    /// Attachments accumulated so far, in arrival order.
    pub fn pending(&self) -> &[MediaAttachment] {
        &self.pending
    }

    /// Registers a launched capture whose completion is still outstanding.
    ///
    /// The target file is removed when the capture is cancelled, fails, or
    /// is still outstanding when the composer closes.
    pub fn track_capture(&mut self, target: CaptureTarget) -> Result<(), WorkflowError> {
        self.ensure_composing()?;
        self.captures
            .insert(target.locator().to_string(), target.path().to_path_buf());
        Ok(())
    }

    /// Number of tracked captures without a completion yet.
    pub fn outstanding_captures(&self) -> usize {
        self.captures.len()
    }

    /// Appends an attachment directly, bypassing the completion channel.
    pub fn attach(&mut self, attachment: MediaAttachment) -> Result<(), WorkflowError> {
        self.ensure_composing()?;
        self.poll_media();
        self.pending.push(attachment);
        Ok(())
    }

    /// Moves received completions into the pending buffer.
    ///
    /// Returns the number of attachments appended. A cancelled or failed
    /// capture removes its tracked target file. Completions arriving after
    /// the composer closed are discarded.
    pub fn poll_media(&mut self) -> usize {
        let events = self.inbox.drain();
        if !self.is_composing() {
            if !events.is_empty() {
                debug!(
                    "event=media_discarded module=workflow count={} reason=composer_closed",
                    events.len()
                );
            }
            return 0;
        }
        let mut appended = 0;
        for event in events {
            let label = event.label();
            let settled = event
                .capture_locator()
                .and_then(|locator| self.captures.remove(locator));
            if let Some(path) = settled {
                if !matches!(event, MediaEvent::Captured { .. }) {
                    remove_image_file(&path);
                }
            }
            match event.into_attachment() {
                Some(attachment) => {
                    self.pending.push(attachment);
                    appended += 1;
                }
                None => {
                    debug!("event=media_completion module=workflow kind={label} appended=false");
                }
            }
        }
        appended
    }

    /// Validates the fields and appends the composed note to `store`.
    ///
    /// The note carries a copy of the pending buffer, which is then cleared.
    ///
    /// # Errors
    /// - `WorkflowError::Validation` when title or description is blank; the
    ///   composer stays open and `store` is not touched.
    /// - `WorkflowError::Closed` after commit or cancel.
    pub fn commit(&mut self, store: &mut NoteStore) -> Result<NoteId, WorkflowError> {
        self.ensure_composing()?;
        self.poll_media();
        if let Err(err) = self.fields.validate() {
            debug!("event=note_commit module=workflow status=rejected reason={err}");
            return Err(err.into());
        }

        let note = self.fields.clone().into_note(self.pending.clone());
        let attachments = note.attachments.len();
        let id = store.add(note);
        self.pending.clear();
        self.discard_captures();
        self.state = ComposerState::Committed(id);
        info!("event=note_commit module=workflow status=ok id={id} attachments={attachments}");
        Ok(id)
    }

    /// Discards the composed fields and the pending buffer.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        self.ensure_composing()?;
        self.fields.clear();
        self.pending.clear();
        self.discard_captures();
        self.state = ComposerState::Cancelled;
        debug!("event=note_compose module=workflow status=cancelled");
        Ok(())
    }

    fn discard_captures(&mut self) {
        for (_, path) in self.captures.drain() {
            remove_image_file(&path);
        }
    }

    fn ensure_composing(&self) -> Result<(), WorkflowError> {
        if self.is_composing() {
            Ok(())
        } else {
            Err(WorkflowError::Closed)
        }
    }
}
