//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! owner of the store. Every mutation, whether it comes from the operator or
//! from an out-of-band [`crate::surface::ExternalCommand`], goes through here.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Carries the locator kind** so callers never pass it per record
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O and no presentation.
//!
//! `UispectApi<S: ElementStore>` is generic over the store so tests can swap
//! in their own container.

use crate::clipboard::{ClipboardBackend, ClipboardWriter, CopyField};
use crate::commands;
use crate::error::Result;
use crate::model::{Entry, LocatorKind};
use crate::store::ElementStore;
use serde_json::Value;
use std::time::Instant;

pub struct UispectApi<S: ElementStore> {
    store: S,
    locator: LocatorKind,
}

impl<S: ElementStore> UispectApi<S> {
    pub fn new(store: S, locator: LocatorKind) -> Self {
        Self { store, locator }
    }

    /// Validates `data` (a record or an array of records) and appends it.
    pub fn add_elements(&mut self, data: &Value) -> Result<commands::CmdResult> {
        commands::ingest::run(&mut self.store, data, self.locator)
    }

    /// Same as [`Self::add_elements`] for JSON text.
    pub fn add_elements_str(&mut self, json: &str) -> Result<commands::CmdResult> {
        commands::ingest::run_str(&mut self.store, json, self.locator)
    }

    /// Validates without touching the store.
    pub fn check_elements(&self, data: &Value) -> Result<usize> {
        commands::ingest::ingest(data, self.locator).map(|batch| batch.len())
    }

    pub fn clear_elements(&mut self) -> commands::CmdResult {
        commands::clear::run(&mut self.store)
    }

    pub fn set_package(&mut self, name: String) -> commands::CmdResult {
        commands::package::run(&mut self.store, name)
    }

    pub fn list(&self, query: &str) -> commands::CmdResult {
        commands::search::run(&self.store, query)
    }

    pub fn element_at(&self, query: &str, position: usize) -> Result<&Entry> {
        commands::helpers::resolve_position(&self.store, query, position)
    }

    pub fn copy<P: ClipboardBackend, F: ClipboardBackend>(
        &self,
        writer: &mut ClipboardWriter<P, F>,
        query: &str,
        position: usize,
        field: CopyField,
        now: Instant,
    ) -> Result<commands::CmdResult> {
        commands::copy::run(&self.store, writer, query, position, field, now)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use commands::{CmdMessage, CmdResult, ListedElement, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    fn api() -> UispectApi<InMemoryStore> {
        UispectApi::new(InMemoryStore::new(), LocatorKind::Bounds)
    }

    #[test]
    fn added_button_is_found_by_type() {
        let mut api = api();
        api.add_elements(&json!([{"class": "android.widget.Button", "bounds": "[0,0][10,10]"}]))
            .unwrap();

        let result = api.list("button");
        assert_eq!(result.listed_elements.len(), 1);
        assert_eq!(result.listed_elements[0].entry.element.class, "android.widget.Button");
    }

    #[test]
    fn add_elements_uses_configured_locator() {
        let mut api = UispectApi::new(InMemoryStore::new(), LocatorKind::Position);
        assert!(api.add_elements(&json!({"class": "a.B", "bounds": "[0,0][1,1]"})).is_err());
        assert!(api.add_elements(&json!({"class": "a.B", "position": "1:1"})).is_ok());
        assert_eq!(api.store().len(), 1);
    }

    #[test]
    fn add_elements_str_rejects_bad_json_without_changes() {
        let mut api = api();
        assert!(api.add_elements_str("not json").is_err());
        assert!(api.store().is_empty());
    }

    #[test]
    fn check_does_not_append() {
        let api = api();
        let count = api
            .check_elements(&json!([{"class": "a.B", "bounds": "x"}, {"class": "a.C", "bounds": "y"}]))
            .unwrap();
        assert_eq!(count, 2);
        assert!(api.store().is_empty());
    }

    #[test]
    fn clear_and_package_dispatch() {
        let mut api = api();
        api.add_elements(&json!({"class": "a.B", "bounds": "x"})).unwrap();
        api.set_package("com.kulle".into());
        api.clear_elements();

        assert!(api.store().is_empty());
        assert_eq!(api.store().package(), Some("com.kulle"));
    }
}
