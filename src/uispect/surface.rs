//! External command surface.
//!
//! Capture agents and debugging consoles push records into a running session
//! as JSON objects, one per line (JSONL):
//!
//! ```json
//! {"type": "addElements", "data": [{"class": "android.widget.Button", "bounds": "[0,0][100,50]"}]}
//! {"type": "addElements", "data": {"class": "android.widget.TextView", "bounds": "[0,60][100,90]"}}
//! {"type": "clearElements"}
//! {"type": "setPackage", "name": "com.kulle"}
//! ```
//!
//! These are the only externally triggerable writes. Lines are read on a
//! listener thread, parsed into [`Input`] values and sent over a bounded
//! channel to the thread that owns the session, which applies them one at a
//! time. A batch is therefore validated and appended in one step, never
//! interleaved with a render.
//!
//! Lines that do not start with `{` are operator actions (`search`, `toggle`,
//! `copy`, ...), see [`crate::session::OperatorAction`].

use crate::api::UispectApi;
use crate::commands::{CmdMessage, CmdResult};
use crate::session::OperatorAction;
use crate::store::ElementStore;
use serde::Deserialize;
use serde_json::Value;
use std::io::{BufRead, BufReader, Stdin};

const CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExternalCommand {
    /// Validate and append one record or an array of records
    AddElements { data: Value },
    /// Empty the element list
    ClearElements,
    /// Replace the package name
    SetPackage { name: String },
}

/// One parsed line from the command stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    External(ExternalCommand),
    Operator(OperatorAction),
    /// A line that could not be parsed, with the reason
    Invalid(String),
}

pub fn parse_line(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let input = if line.starts_with('{') {
        match serde_json::from_str::<ExternalCommand>(line) {
            Ok(cmd) => Input::External(cmd),
            Err(e) => Input::Invalid(format!("Invalid command: {}", e)),
        }
    } else {
        match line.parse::<OperatorAction>() {
            Ok(action) => Input::Operator(action),
            Err(e) => Input::Invalid(e),
        }
    };
    Some(input)
}

/// Applies an external command. A rejected batch becomes an error message and
/// leaves the store unchanged.
pub fn dispatch<S: ElementStore>(api: &mut UispectApi<S>, cmd: ExternalCommand) -> CmdResult {
    match cmd {
        ExternalCommand::AddElements { data } => match api.add_elements(&data) {
            Ok(result) => result,
            Err(e) => CmdResult::default().with_message(CmdMessage::error(e.to_string())),
        },
        ExternalCommand::ClearElements => api.clear_elements(),
        ExternalCommand::SetPackage { name } => api.set_package(name),
    }
}

/// Reads `reader` line by line on a background thread and forwards parsed
/// inputs. The thread exits at end of input or when the receiver is dropped.
pub fn spawn_listener<R>(reader: R) -> async_channel::Receiver<Input>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = async_channel::bounded(CHANNEL_CAPACITY);

    std::thread::spawn(move || {
        tracing::debug!("command listener started");
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    let Some(input) = parse_line(&line) else {
                        continue;
                    };
                    tracing::trace!(?input, "received");
                    if tx.send_blocking(input).is_err() {
                        tracing::debug!("command channel closed");
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error reading commands");
                    break;
                }
            }
        }
        tracing::debug!("command listener exiting");
    });

    rx
}

/// A locked `Stdin` holds a mutex guard and cannot cross threads, so the
/// listener gets its own buffered handle.
fn stdin_reader() -> BufReader<Stdin> {
    BufReader::new(std::io::stdin())
}

pub fn start_stdin_listener() -> async_channel::Receiver<Input> {
    spawn_listener(stdin_reader())
}
