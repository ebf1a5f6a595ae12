use crate::commands::{CmdMessage, CmdResult};
use crate::store::ElementStore;

pub fn run<S: ElementStore>(store: &mut S, name: String) -> CmdResult {
    tracing::info!(package = %name, "package set");
    let message = CmdMessage::success(format!("Package set: {}", name));
    store.set_package(name);
    CmdResult::default().with_message(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn replaces_package() {
        let mut store = InMemoryStore::new();
        run(&mut store, "com.first".into());
        let result = run(&mut store, "com.second".into());
        assert_eq!(store.package(), Some("com.second"));
        assert_eq!(result.messages[0].content, "Package set: com.second");
    }
}
