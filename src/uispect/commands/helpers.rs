use crate::commands::search::filter;
use crate::error::{Result, UispectError};
use crate::model::Entry;
use crate::store::ElementStore;

/// Resolves a 1-based row number in the view produced by `query`.
pub fn resolve_position<'a, S: ElementStore>(
    store: &'a S,
    query: &str,
    position: usize,
) -> Result<&'a Entry> {
    position
        .checked_sub(1)
        .and_then(|i| filter(store.entries(), query).nth(i))
        .ok_or_else(|| UispectError::Api(format!("No element at position {}", position)))
}
