//! Row selection by key.
//!
//! Selection operations are scoped to a list of "selectable" keys, which is
//! normally the page the user is looking at. Keys outside that list are never
//! touched by the bulk operations.

use std::hash::Hash;

use indexmap::IndexSet;

/// Tri-state of a "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    /// Some, but not all, selectable rows are selected.
    Indeterminate,
    Checked,
}

/// Ordered set of selected row keys.
///
/// Keys are kept in the order they were selected. Membership is a set, so
/// repeated toggles are idempotent.
#[derive(Debug, Clone)]
pub struct SelectionSet<K: Hash + Eq> {
    keys: IndexSet<K>,
}

impl<K: Hash + Eq> Default for SelectionSet<K> {
    fn default() -> Self {
        Self {
            keys: IndexSet::new(),
        }
    }
}

impl<K: Hash + Eq> PartialEq for SelectionSet<K> {
    /// Two selections are equal when they hold the same keys in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len() && self.keys.iter().eq(other.keys.iter())
    }
}

impl<K: Hash + Eq> Eq for SelectionSet<K> {}

impl<K: Hash + Eq> FromIterator<K> for SelectionSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<K: Hash + Eq + Clone> SelectionSet<K> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate selected keys in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Selected keys in selection order.
    pub fn to_vec(&self) -> Vec<K> {
        self.keys.iter().cloned().collect()
    }

    /// Add or remove a single key. Returns true if the selection changed.
    pub fn toggle_row(&mut self, key: K, checked: bool) -> bool {
        if checked {
            self.keys.insert(key)
        } else {
            self.keys.shift_remove(&key)
        }
    }

    /// Select or deselect every key in `selectable`.
    ///
    /// Returns the number of keys added or removed.
    pub fn toggle_all(&mut self, selectable: &[K], checked: bool) -> usize {
        selectable
            .iter()
            .filter(|key| self.toggle_row((*key).clone(), checked))
            .count()
    }

    /// True when `selectable` is non-empty and every key in it is selected.
    pub fn all_selected(&self, selectable: &[K]) -> bool {
        !selectable.is_empty() && selectable.iter().all(|key| self.keys.contains(key))
    }

    /// True when some, but not all, of `selectable` is selected.
    pub fn some_selected(&self, selectable: &[K]) -> bool {
        selectable.iter().any(|key| self.keys.contains(key)) && !self.all_selected(selectable)
    }

    /// Header checkbox state for `selectable`.
    pub fn check_state(&self, selectable: &[K]) -> CheckState {
        if self.all_selected(selectable) {
            CheckState::Checked
        } else if self.some_selected(selectable) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Keep only the keys for which `keep` returns true.
    ///
    /// Returns the removed keys.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> Vec<K> {
        let removed: Vec<K> = self.keys.iter().filter(|k| !keep(*k)).cloned().collect();
        for key in &removed {
            self.keys.shift_remove(key);
        }
        removed
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<K> {
        self.keys.drain(..).collect()
    }
}
