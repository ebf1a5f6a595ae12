use crate::commands::{CmdMessage, CmdResult};
use crate::store::ElementStore;

pub fn run<S: ElementStore>(store: &mut S) -> CmdResult {
    let removed = store.len();
    store.clear();
    tracing::info!(removed, "store cleared");
    CmdResult::default().with_message(CmdMessage::success("List cleared"))
}
