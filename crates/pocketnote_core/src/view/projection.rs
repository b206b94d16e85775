use crate::model::note::Note;
use crate::store::StoreSnapshot;
use crate::view::{SortMode, ViewQuery};
use log::trace;

/// Case-insensitive substring match on title or description.
///
/// An empty search text matches every note. Case is folded one character at
/// a time, so context-sensitive mappings such as final sigma do not apply.
pub fn matches_search(note: &Note, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = fold_case(search_text);
    fold_case(&note.title).contains(&needle) || fold_case(&note.description).contains(&needle)
}

fn fold_case(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// Sort key of one note under `mode`.
///
/// Under `TaskDueDate`, tasks yield their due date (`None` when unset, which
/// orders first) while every other note still yields its title. The two
/// kinds of key are compared against each other directly.
pub fn sort_key(note: &Note, mode: SortMode) -> Option<&str> {
    if mode.is_task_due_date() && note.is_task {
        note.due_date.as_deref()
    } else {
        Some(note.title.as_str())
    }
}

/// Produces a fresh filtered and stably sorted list.
pub fn project(notes: &[Note], query: &ViewQuery) -> Vec<Note> {
    let mut visible: Vec<Note> = notes
        .iter()
        .filter(|note| matches_search(note, &query.search_text))
        .cloned()
        .collect();
    // `sort_by` is stable: equal keys keep store order.
    visible.sort_by(|a, b| sort_key(a, query.sort_mode).cmp(&sort_key(b, query.sort_mode)));
    visible
}

/// Cached projection, recomputed when the snapshot or the query changes.
#[derive(Debug, Default)]
pub struct Projection {
    computed_for: Option<(u64, ViewQuery)>,
    items: Vec<Note>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes if `snapshot` or `query` differ from the last inputs.
    ///
    /// Returns `true` when a recomputation happened.
    pub fn refresh(&mut self, snapshot: &StoreSnapshot, query: &ViewQuery) -> bool {
        if let Some((version, last_query)) = &self.computed_for {
            if *version == snapshot.version() && last_query == query {
                return false;
            }
        }
        self.items = project(snapshot.notes(), query);
        trace!(
            "event=projection_refreshed module=view version={} visible={} total={}",
            snapshot.version(),
            self.items.len(),
            snapshot.len()
        );
        self.computed_for = Some((snapshot.version(), query.clone()));
        true
    }

    /// Derived list from the latest refresh.
    pub fn items(&self) -> &[Note] {
        &self.items
    }
}
