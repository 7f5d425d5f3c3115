//! Generic single-selection state.
//!
//! Holds at most one selected key. The key is a weak reference: the owner of
//! the underlying collection decides whether it still points at something.

/// Single selection with toggle semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleSelection<T> {
    selected: Option<T>,
}

impl<T> Default for ToggleSelection<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T: PartialEq> ToggleSelection<T> {
    /// Create a new selection state with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection state with an initial key.
    pub fn with_selected(key: Option<T>) -> Self {
        Self { selected: key }
    }

    /// Get the currently selected key.
    pub fn get(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Select `key`, or clear the selection if `key` is already selected.
    ///
    /// Returns `true` when `key` is selected afterwards.
    pub fn toggle(&mut self, key: T) -> bool {
        if self.selected.as_ref() == Some(&key) {
            self.selected = None;
            false
        } else {
            self.selected = Some(key);
            true
        }
    }

    /// Clear the selection if it currently holds `key`.
    ///
    /// Returns `true` when the selection was cleared.
    pub fn clear_if(&mut self, key: &T) -> bool {
        if self.selected.as_ref() == Some(key) {
            self.selected = None;
            true
        } else {
            false
        }
    }
}
