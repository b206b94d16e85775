//! In-memory note storage with snapshot subscriptions.
//!
//! # Responsibility
//! - Own every note for the lifetime of the process (no persistence).
//! - Publish an immutable snapshot to subscribers after each mutation.
//!
//! # Invariants
//! - Insertion order is the canonical display order.
//! - Mutations addressed to a missing id never change state.

use crate::model::note::NoteId;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod note_store;

pub use note_store::{NoteStore, StoreSnapshot, SubscriptionId};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for id-addressed mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(NoteId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for StoreError {}
