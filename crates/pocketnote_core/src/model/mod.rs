//! Domain model for notes, tasks and their attached media.
//!
//! # Responsibility
//! - Define the records owned by the note store and the editing forms.
//! - Keep boundary validation next to the editable field set.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Media attachments are immutable once created.

pub mod media;
pub mod note;
