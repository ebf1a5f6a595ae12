//! Batch ingestion: validate a whole batch, then normalize it.
//!
//! Validation is all-or-nothing. Every record is checked before any is
//! normalized, and a single bad record rejects the batch, so the store only
//! ever sees complete batches.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, UispectError};
use crate::model::{Element, LocatorKind};
use crate::normalize::{is_valid, normalize_at};
use crate::store::ElementStore;
use serde_json::Value;

/// Validates and normalizes `raw`. An array is a batch; anything else is a
/// batch of one.
pub fn ingest(raw: &Value, kind: LocatorKind) -> Result<Vec<Element>> {
    let records: &[Value] = match raw {
        Value::Array(items) => items,
        single => std::slice::from_ref(single),
    };

    if let Some(index) = records.iter().position(|r| !is_valid(r, kind)) {
        return Err(UispectError::Validation {
            index,
            field: kind.field_name(),
        });
    }

    records
        .iter()
        .enumerate()
        .map(|(i, r)| normalize_at(r, kind, i))
        .collect()
}

/// Parses JSON text and ingests it.
pub fn ingest_str(json: &str, kind: LocatorKind) -> Result<Vec<Element>> {
    let raw: Value = serde_json::from_str(json)?;
    ingest(&raw, kind)
}

/// Ingests `raw` and appends the batch to the store. On rejection the store is
/// left exactly as it was.
pub fn run<S: ElementStore>(store: &mut S, raw: &Value, kind: LocatorKind) -> Result<CmdResult> {
    append(store, ingest(raw, kind))
}

/// [`run`] for JSON text. Text that does not parse is rejected the same way.
pub fn run_str<S: ElementStore>(store: &mut S, json: &str, kind: LocatorKind) -> Result<CmdResult> {
    append(store, ingest_str(json, kind))
}

fn append<S: ElementStore>(store: &mut S, ingested: Result<Vec<Element>>) -> Result<CmdResult> {
    let batch = match ingested {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(error = %e, "batch rejected");
            return Err(e);
        }
    };

    let count = batch.len();
    let keys = store.append(batch);
    tracing::info!(count, total = store.len(), "batch appended");

    Ok(CmdResult::default()
        .with_affected_keys(keys)
        .with_message(CmdMessage::success(format!("{} element(s) added", count))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    #[test]
    fn single_record_is_a_batch_of_one() {
        let batch = ingest(
            &json!({"class": "android.widget.Button", "bounds": "[0,0][10,10]"}),
            LocatorKind::Bounds,
        )
        .unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].class, "android.widget.Button");
    }

    #[test]
    fn keeps_batch_order() {
        let batch = ingest(
            &json!([
                {"class": "a.First", "bounds": "1"},
                {"class": "a.Second", "bounds": "2"},
                {"class": "a.Third", "bounds": "3"}
            ]),
            LocatorKind::Bounds,
        )
        .unwrap();
        let classes: Vec<_> = batch.iter().map(|e| e.class.as_str()).collect();
        assert_eq!(classes, vec!["a.First", "a.Second", "a.Third"]);
    }

    #[test]
    fn rejects_whole_batch_when_one_record_is_invalid() {
        let mut store = InMemoryStore::new();
        let raw = json!([
            {"class": "a.Valid", "bounds": "[0,0][1,1]"},
            {"id": "no-class", "bounds": "[0,0][1,1]"}
        ]);

        let err = run(&mut store, &raw, LocatorKind::Bounds).unwrap_err();
        assert!(matches!(err, UispectError::Validation { index: 1, .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn rejection_leaves_existing_entries_untouched() {
        let mut store = InMemoryStore::new();
        run(&mut store, &json!({"class": "a.B", "bounds": "x"}), LocatorKind::Bounds).unwrap();

        let bad = json!([{"class": "a.C", "bounds": "y"}, {"class": 7, "bounds": "z"}]);
        assert!(run(&mut store, &bad, LocatorKind::Bounds).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].element.class, "a.B");
    }

    #[test]
    fn empty_array_is_accepted() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &json!([]), LocatorKind::Bounds).unwrap();
        assert!(result.affected_keys.is_empty());
        assert_eq!(result.messages[0].content, "0 element(s) added");
    }

    #[test]
    fn run_appends_and_reports_count() {
        let mut store = InMemoryStore::new();
        let raw = json!([
            {"class": "a.B", "position": "1:1"},
            {"class": "a.C", "position": "2:2"}
        ]);
        let result = run(&mut store, &raw, LocatorKind::Position).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(result.affected_keys.len(), 2);
        assert_eq!(result.messages[0].content, "2 element(s) added");
    }

    #[test]
    fn ingest_str_reports_bad_json() {
        let err = ingest_str("[{\"class\":", LocatorKind::Bounds).unwrap_err();
        assert!(matches!(err, UispectError::Serialization(_)));
    }

    #[test]
    fn run_str_appends_parsed_text() {
        let mut store = InMemoryStore::new();
        let result = run_str(
            &mut store,
            r#"[{"class":"a.B","bounds":"x"},{"class":"a.C","bounds":"y"}]"#,
            LocatorKind::Bounds,
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(result.messages[0].content, "2 element(s) added");
    }

    #[test]
    fn run_str_rejects_bad_json_without_touching_store() {
        let mut store = InMemoryStore::new();
        run_str(&mut store, r#"{"class":"a.B","bounds":"x"}"#, LocatorKind::Bounds).unwrap();

        let err = run_str(&mut store, "{\"class\":", LocatorKind::Bounds).unwrap_err();
        assert!(matches!(err, UispectError::Serialization(_)));
        assert_eq!(store.len(), 1);
    }
}
