//! Interactive session state.
//!
//! A [`Session`] is the view layer: it owns the API (and through it the store),
//! the search query, the expansion tracker and the clipboard writer. All of it
//! lives on one thread. External commands and operator actions arrive through
//! [`crate::surface`] and are applied one at a time.

use crate::api::UispectApi;
use crate::clipboard::{ClipboardBackend, ClipboardWriter, CommandClipboard, CopyField, SystemClipboard};
use crate::commands::search::filter;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::expansion::ExpansionTracker;
use crate::model::Entry;
use crate::store::ElementStore;
use crate::surface::{self, ExternalCommand};
use std::str::FromStr;
use std::time::Instant;

/// Something the operator typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorAction {
    /// Replace the search query; an empty query shows everything
    Search(String),
    /// Expand or collapse the row at a 1-based position in the current view
    Toggle(usize),
    Copy { position: usize, field: CopyField },
    List,
    Help,
    Quit,
}

impl FromStr for OperatorAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, rest) = match s.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (s, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "search" | "s" | "/" => Ok(OperatorAction::Search(rest.to_string())),
            "toggle" | "t" => parse_position(rest).map(OperatorAction::Toggle),
            "copy" | "c" => {
                let mut parts = rest.split_whitespace();
                let position = parse_position(parts.next().unwrap_or(""))?;
                let field = match parts.next() {
                    Some(f) => f.parse()?,
                    None => CopyField::All,
                };
                Ok(OperatorAction::Copy { position, field })
            }
            "list" | "ls" => Ok(OperatorAction::List),
            "help" | "?" => Ok(OperatorAction::Help),
            "quit" | "exit" | "q" => Ok(OperatorAction::Quit),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

fn parse_position(s: &str) -> std::result::Result<usize, String> {
    s.parse()
        .map_err(|_| format!("Expected a row number, got '{}'", s))
}

/// A rendered row.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub position: usize,
    pub entry: &'a Entry,
    pub expanded: bool,
}

pub struct Session<S: ElementStore, P = SystemClipboard, F = CommandClipboard> {
    api: UispectApi<S>,
    writer: ClipboardWriter<P, F>,
    query: String,
    expansion: ExpansionTracker,
}

impl<S, P, F> Session<S, P, F>
where
    S: ElementStore,
    P: ClipboardBackend,
    F: ClipboardBackend,
{
    pub fn new(api: UispectApi<S>, writer: ClipboardWriter<P, F>) -> Self {
        Self {
            api,
            writer,
            query: String::new(),
            expansion: ExpansionTracker::new(),
        }
    }

    pub fn apply_external(&mut self, cmd: ExternalCommand) -> CmdResult {
        let cleared = matches!(cmd, ExternalCommand::ClearElements);
        let result = surface::dispatch(&mut self.api, cmd);
        if cleared {
            self.expansion.collapse_all();
            self.writer.reset_feedback();
        }
        result
    }

    /// Applies an operator action. `Quit`, `List` and `Help` need no state
    /// change and are left to the caller.
    pub fn apply(&mut self, action: OperatorAction, now: Instant) -> Result<CmdResult> {
        match action {
            OperatorAction::Search(query) => {
                let result = if query.is_empty() {
                    CmdResult::default().with_message(CmdMessage::info("Search cleared"))
                } else {
                    CmdResult::default()
                        .with_message(CmdMessage::info(format!("Searching for '{}'", query)))
                };
                self.query = query;
                Ok(result)
            }
            OperatorAction::Toggle(position) => {
                let key = self.api.element_at(&self.query, position)?.key;
                let expanded = self.expansion.toggle(key);
                tracing::debug!(%key, expanded, "toggled");
                Ok(CmdResult::default().with_affected_keys(vec![key]))
            }
            OperatorAction::Copy { position, field } => {
                self.api.copy(&mut self.writer, &self.query, position, field, now)
            }
            OperatorAction::List | OperatorAction::Help | OperatorAction::Quit => {
                Ok(CmdResult::default())
            }
        }
    }

    /// Rows visible under the current query.
    pub fn rows(&self) -> Vec<Row<'_>> {
        filter(self.api.store().entries(), &self.query)
            .enumerate()
            .map(|(i, entry)| Row {
                position: i + 1,
                entry,
                expanded: self.expansion.is_expanded(entry.key),
            })
            .collect()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.writer.is_copied(now)
    }

    pub fn api(&self) -> &UispectApi<S> {
        &self.api
    }
}
