use crate::model::note::{Note, NoteId};
use crate::store::{StoreError, StoreResult};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Handle returned by [`NoteStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&StoreSnapshot) + Send>;

/// Immutable view of the store at one version.
///
/// Cloning is cheap; the note list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    version: u64,
    notes: Arc<[Note]>,
}

impl StoreSnapshot {
    /// Monotonic counter bumped by every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Notes in display (insertion) order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            version: 0,
            notes: Arc::from(Vec::new()),
        }
    }
}

/// Ordered collection of notes keyed by stable id.
#[derive(Default)]
pub struct NoteStore {
    notes: HashMap<NoteId, Note>,
    order: Vec<NoteId>,
    snapshot: StoreSnapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Debug for NoteStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("len", &self.order.len())
            .field("version", &self.snapshot.version)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a note to the end of the display order.
    ///
    /// Duplicate titles/descriptions are allowed. An id already present is
    /// replaced by a fresh one so that ids stay unique.
    pub fn add(&mut self, mut note: Note) -> NoteId {
        if note.id.is_nil() || self.notes.contains_key(&note.id) {
            note.id = uuid::Uuid::new_v4();
        }
        let id = note.id;
        self.notes.insert(id, note);
        self.order.push(id);
        debug!(
            "event=note_added module=store status=ok id={} len={}",
            id,
            self.order.len()
        );
        self.publish();
        id
    }

    /// Replaces the note stored under `id`, keeping its position.
    ///
    /// The replacement always keeps `id`, whatever id `note` carries.
    ///
    /// # Errors
    /// - Returns `StoreError::NotFound` and leaves state untouched when `id`
    ///   is not stored.
    pub fn update(&mut self, id: NoteId, mut note: Note) -> StoreResult<()> {
        let Some(slot) = self.notes.get_mut(&id) else {
            warn!("event=note_update module=store status=missing id={id}");
            return Err(StoreError::NotFound(id));
        };
        note.id = id;
        *slot = note;
        debug!("event=note_updated module=store status=ok id={id}");
        self.publish();
        Ok(())
    }

    /// Removes the note stored under `id`.
    ///
    /// Returns `None` without side effects when the note is already gone.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let removed = self.notes.remove(&id)?;
        self.order.retain(|entry| *entry != id);
        debug!(
            "event=note_removed module=store status=ok id={} len={}",
            id,
            self.order.len()
        );
        self.publish();
        Some(removed)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.contains_key(&id)
    }

    /// Position of `id` in display order.
    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.order.iter().position(|entry| *entry == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Current immutable snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot.clone()
    }

    /// Registers a callback invoked with every new snapshot.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&StoreSnapshot) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(entry, _)| *entry != id);
        self.subscribers.len() != before
    }

    fn publish(&mut self) {
        let notes: Vec<Note> = self
            .order
            .iter()
            .filter_map(|id| self.notes.get(id).cloned())
            .collect();
        self.snapshot = StoreSnapshot {
            version: self.snapshot.version + 1,
            notes: Arc::from(notes),
        };
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.snapshot);
        }
    }
}
