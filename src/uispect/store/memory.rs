use super::ElementStore;
use crate::model::{Element, ElementKey, Entry};

/// Session store. Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Vec<Entry>,
    package: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElementStore for InMemoryStore {
    fn append(&mut self, batch: Vec<Element>) -> Vec<ElementKey> {
        let start = self.entries.len();
        self.entries.extend(batch.into_iter().map(Entry::new));
        self.entries[start..].iter().map(|e| e.key).collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn set_package(&mut self, name: String) {
        self.package = Some(name);
    }

    fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Locator;

    pub fn button(text: &str) -> Element {
        Element::new("android.widget.Button", Locator::Bounds("[0,0][10,10]".into()))
            .with_text(text)
    }

    pub fn element(class: &str, text: &str) -> Element {
        Element::new(class, Locator::Bounds("[0,0][1,1]".into())).with_text(text)
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
            self.store.append(elements);
            self
        }

        pub fn with_buttons(mut self, count: usize) -> Self {
            let batch = (1..=count).map(|i| button(&format!("Button {}", i))).collect();
            self.store.append(batch);
            self
        }
    }
}
