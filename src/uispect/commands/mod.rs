use crate::model::{ElementKey, Entry};

pub mod clear;
pub mod copy;
pub mod helpers;
pub mod ingest;
pub mod package;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A row of the rendered list: an entry and its 1-based position in the
/// current (possibly filtered) view.
#[derive(Debug, Clone)]
pub struct ListedElement {
    pub position: usize,
    pub entry: Entry,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_keys: Vec<ElementKey>,
    pub listed_elements: Vec<ListedElement>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn with_affected_keys(mut self, keys: Vec<ElementKey>) -> Self {
        self.affected_keys = keys;
        self
    }

    pub fn with_listed_elements(mut self, elements: Vec<ListedElement>) -> Self {
        self.listed_elements = elements;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
