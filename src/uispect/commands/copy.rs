use crate::clipboard::{format_for_clipboard, ClipboardBackend, ClipboardWriter, CopyField, CopyOutcome};
use crate::commands::helpers::resolve_position;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ElementStore;
use std::time::Instant;

/// Copies one field of the element shown at `position` under `query`.
///
/// Only a bad position is an error. A clipboard failure is reported as a
/// warning message; there is nothing more the caller could do about it.
pub fn run<S, P, F>(
    store: &S,
    writer: &mut ClipboardWriter<P, F>,
    query: &str,
    position: usize,
    field: CopyField,
    now: Instant,
) -> Result<CmdResult>
where
    S: ElementStore,
    P: ClipboardBackend,
    F: ClipboardBackend,
{
    let entry = resolve_position(store, query, position)?;
    let text = format_for_clipboard(&entry.element, field);

    let message = match writer.copy(&text, now) {
        CopyOutcome::Primary | CopyOutcome::Fallback => {
            CmdMessage::success(format!("Copied {} of element {}", field.label(), position))
        }
        CopyOutcome::Failed => CmdMessage::warning("Could not copy to clipboard"),
    };

    Ok(CmdResult::default()
        .with_affected_keys(vec![entry.key])
        .with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::UispectError;
    use crate::store::memory::fixtures::{element, StoreFixture};
    use std::time::Duration;

    struct Sink {
        fail: bool,
    }

    impl ClipboardBackend for Sink {
        fn name(&self) -> &'static str {
            "sink"
        }

        fn write(&mut self, _text: &str) -> Result<()> {
            if self.fail {
                return Err(UispectError::Clipboard("unsupported".into()));
            }
            Ok(())
        }
    }

    fn writer(fail: bool) -> ClipboardWriter<Sink, Sink> {
        ClipboardWriter::new(None, Sink { fail }, Duration::from_millis(1500))
    }

    #[test]
    fn copies_field_of_filtered_row() {
        let store = StoreFixture::new()
            .with_elements(vec![
                element("a.TextView", "title"),
                element("a.Button", "PRESSIONE").with_id("com.kulle:id/btn"),
            ])
            .store;
        let mut w = writer(false);
        let now = Instant::now();

        let result = run(&store, &mut w, "button", 1, CopyField::Id, now).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.affected_keys, vec![store.entries()[1].key]);
        assert!(w.is_copied(now));
    }

    #[test]
    fn clipboard_failure_is_a_warning_not_an_error() {
        let store = StoreFixture::new().with_buttons(1).store;
        let mut w = writer(true);
        let now = Instant::now();

        let result = run(&store, &mut w, "", 1, CopyField::All, now).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(!w.is_copied(now));
    }

    #[test]
    fn bad_position_is_an_error() {
        let store = StoreFixture::new().with_buttons(1).store;
        let mut w = writer(false);
        assert!(run(&store, &mut w, "", 5, CopyField::Text, Instant::now()).is_err());
    }
}
