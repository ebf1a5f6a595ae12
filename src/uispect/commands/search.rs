use crate::commands::{CmdResult, ListedElement};
use crate::model::{Element, Entry};
use crate::store::ElementStore;

/// Lowercased query, or `None` when the query is blank and everything passes.
fn needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn matches(element: &Element, needle: &str) -> bool {
    [
        element.text.as_str(),
        element.id.as_str(),
        element.description.as_str(),
        element.widget_type(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Entries visible under `query`, in store order.
///
/// The returned iterator is lazy and can be cloned to walk the view again; it
/// is rebuilt on every call and never cached.
pub fn filter<'a>(entries: &'a [Entry], query: &str) -> impl Iterator<Item = &'a Entry> + Clone + 'a {
    let needle = needle(query);
    entries.iter().filter(move |entry| match &needle {
        None => true,
        Some(n) => matches(&entry.element, n),
    })
}

pub fn run<S: ElementStore>(store: &S, query: &str) -> CmdResult {
    let listed = filter(store.entries(), query)
        .enumerate()
        .map(|(i, entry)| ListedElement {
            position: i + 1,
            entry: entry.clone(),
        })
        .collect();
    CmdResult::default().with_listed_elements(listed)
}
