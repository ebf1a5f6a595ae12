//! # Element Store
//!
//! The store is the single source of truth for the session: an ordered list of
//! [`Entry`] values plus the package slot. View state (search query, expanded
//! rows, copy feedback) is derived from it and never duplicates its data.
//!
//! ## Rules
//!
//! - Insertion order is preserved; duplicates are allowed.
//! - The only list mutations are append-batch and clear. Nothing reorders or
//!   deduplicates.
//! - Each mutation is one atomic step. `append` takes an already validated
//!   batch, so there is no way to leave half a batch behind.
//! - Nothing is persisted. A store lives as long as the process.
//!
//! The [`ElementStore`] trait keeps commands independent of the concrete
//! container; [`memory::InMemoryStore`] is the implementation used by both the
//! CLI and the tests.

use crate::model::{Element, ElementKey, Entry};

pub mod memory;

pub trait ElementStore {
    /// Append a normalized batch, returning the keys assigned to it in order.
    fn append(&mut self, batch: Vec<Element>) -> Vec<ElementKey>;

    /// Remove every entry.
    fn clear(&mut self);

    /// All entries in insertion order.
    fn entries(&self) -> &[Entry];

    fn get(&self, key: ElementKey) -> Option<&Entry> {
        self.entries().iter().find(|e| e.key == key)
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Replace the package name as a whole.
    fn set_package(&mut self, name: String);

    fn package(&self) -> Option<&str>;
}
