//! Which rows are expanded to show their details.
//!
//! State is keyed by [`ElementKey`], not by row number. Row numbers change
//! whenever the search query or the store changes; keys do not, so an expanded
//! element stays expanded when it moves in the view and a freshly ingested
//! element never inherits the state of whatever used to sit at its row.

use crate::model::ElementKey;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct ExpansionTracker {
    expanded: HashMap<ElementKey, bool>,
}

impl ExpansionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the state for `key` and returns the new value.
    pub fn toggle(&mut self, key: ElementKey) -> bool {
        let state = self.expanded.entry(key).or_insert(false);
        *state = !*state;
        *state
    }

    pub fn is_expanded(&self, key: ElementKey) -> bool {
        self.expanded.get(&key).copied().unwrap_or(false)
    }

    /// Forgets every key. Used when the store is emptied.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
