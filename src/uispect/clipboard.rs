//! # Clipboard Writer
//!
//! Copying goes through two tiers:
//!
//! 1. **Primary**: the platform clipboard through `arboard`. It can be absent
//!    (no display server, sandboxed session) or refuse a write.
//! 2. **Fallback**: the legacy external copy command (`pbcopy`, `xclip`/`xsel`,
//!    `clip`). Used only when the primary is absent or fails. There is nothing
//!    behind it, so its failure is swallowed and reported as
//!    [`CopyOutcome::Failed`].
//!
//! A successful copy on either tier turns on the "copied" indicator for a fixed
//! window (1500 ms by default). The indicator is a single deadline: a new copy
//! replaces the pending reset instead of stacking another one, and dropping the
//! writer drops the deadline with it.

use crate::error::{Result, UispectError};
use crate::model::Element;
use std::process::Command;
use std::str::FromStr;
use std::time::{Duration, Instant};

pub const DEFAULT_FEEDBACK: Duration = Duration::from_millis(1500);

/// Something that can put text on a clipboard.
pub trait ClipboardBackend {
    fn name(&self) -> &'static str;

    fn write(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Opens the platform clipboard, failing when none is reachable.
    pub fn open() -> Result<Self> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| UispectError::Clipboard(e.to_string()))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| UispectError::Clipboard(e.to_string()))
    }
}

/// Pipes text into an OS copy utility.
/// - macOS: pbcopy
/// - Linux: xclip, then xsel
/// - Windows: clip.exe
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandClipboard;

type CopyCommand = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[CopyCommand] = &[("pbcopy", &[])];

#[cfg(target_os = "linux")]
const COPY_COMMANDS: &[CopyCommand] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "windows")]
const COPY_COMMANDS: &[CopyCommand] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const COPY_COMMANDS: &[CopyCommand] = &[];

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let mut last_err =
            UispectError::Clipboard("No copy command available on this platform".to_string());

        for &(program, args) in COPY_COMMANDS {
            match pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(program, error = %e, "copy command failed");
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| UispectError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| UispectError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| UispectError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(UispectError::Clipboard(format!("{} exited with error", program)))
    }
}

/// Which tier ended up holding the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    Failed,
}

impl CopyOutcome {
    pub fn succeeded(self) -> bool {
        !matches!(self, CopyOutcome::Failed)
    }
}

/// Transient "copied" indicator with one cancellable reset.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    reset_after: Duration,
    visible_until: Option<Instant>,
}

impl CopyFeedback {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            reset_after,
            visible_until: None,
        }
    }

    /// Turns the indicator on, replacing any pending reset.
    pub fn show(&mut self, now: Instant) {
        self.visible_until = Some(now + self.reset_after);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }

    pub fn cancel(&mut self) {
        self.visible_until = None;
    }
}

pub struct ClipboardWriter<P = SystemClipboard, F = CommandClipboard> {
    primary: Option<P>,
    fallback: F,
    feedback: CopyFeedback,
}

impl ClipboardWriter {
    /// Writer over the platform clipboard with the OS command as fallback.
    pub fn system(reset_after: Duration) -> Self {
        let primary = match SystemClipboard::open() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::debug!(error = %e, "system clipboard unavailable");
                None
            }
        };
        ClipboardWriter::new(primary, CommandClipboard, reset_after)
    }
}

impl<P: ClipboardBackend, F: ClipboardBackend> ClipboardWriter<P, F> {
    pub fn new(primary: Option<P>, fallback: F, reset_after: Duration) -> Self {
        Self {
            primary,
            fallback,
            feedback: CopyFeedback::new(reset_after),
        }
    }

    pub fn copy(&mut self, text: &str, now: Instant) -> CopyOutcome {
        let outcome = self.write_through_tiers(text);
        if outcome.succeeded() {
            self.feedback.show(now);
        }
        outcome
    }

    fn write_through_tiers(&mut self, text: &str) -> CopyOutcome {
        if let Some(primary) = self.primary.as_mut() {
            match primary.write(text) {
                Ok(()) => {
                    tracing::debug!(backend = primary.name(), "copied");
                    return CopyOutcome::Primary;
                }
                Err(e) => tracing::debug!(backend = primary.name(), error = %e, "primary copy failed"),
            }
        }

        match self.fallback.write(text) {
            Ok(()) => {
                tracing::debug!(backend = self.fallback.name(), "copied");
                CopyOutcome::Fallback
            }
            Err(e) => {
                tracing::warn!(backend = self.fallback.name(), error = %e, "copy failed");
                CopyOutcome::Failed
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.feedback.is_visible(now)
    }

    /// Hides the indicator before its deadline.
    pub fn reset_feedback(&mut self) {
        self.feedback.cancel();
    }
}

/// Which part of an element a copy action takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyField {
    #[default]
    All,
    Class,
    Id,
    Text,
    Description,
    Locator,
}

impl FromStr for CopyField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(CopyField::All),
            "class" => Ok(CopyField::Class),
            "id" => Ok(CopyField::Id),
            "text" => Ok(CopyField::Text),
            "description" | "desc" => Ok(CopyField::Description),
            "locator" | "bounds" | "position" => Ok(CopyField::Locator),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

impl CopyField {
    pub fn label(self) -> &'static str {
        match self {
            CopyField::All => "element",
            CopyField::Class => "class",
            CopyField::Id => "id",
            CopyField::Text => "text",
            CopyField::Description => "description",
            CopyField::Locator => "locator",
        }
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "—"
    } else {
        s
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Text placed on the clipboard for a copy action.
pub fn format_for_clipboard(element: &Element, field: CopyField) -> String {
    match field {
        CopyField::All => format!(
            "Class: {}\nID: {}\nText: {}\nDescription: {}\n{}: {}\nClickable: {}\nEditable: {}\nCheckable: {}",
            element.class,
            or_dash(&element.id),
            or_dash(&element.text),
            or_dash(&element.description),
            element.locator.kind().label(),
            element.locator,
            yes_no(element.clickable),
            yes_no(element.editable),
            yes_no(element.checkable),
        ),
        CopyField::Class => element.class.clone(),
        CopyField::Id => element.id.clone(),
        CopyField::Text => element.text.clone(),
        CopyField::Description => element.description.clone(),
        CopyField::Locator => element.locator.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Locator;

    #[derive(Default)]
    struct Recording {
        fail: bool,
        writes: Vec<String>,
    }

    impl Recording {
        fn failing() -> Self {
            Self {
                fail: true,
                writes: Vec::new(),
            }
        }
    }

    impl ClipboardBackend for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn write(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(UispectError::Clipboard("denied".into()));
            }
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn primary_success_skips_fallback() {
        let mut writer = ClipboardWriter::new(Some(Recording::default()), Recording::default(), DEFAULT_FEEDBACK);
        let now = Instant::now();

        assert_eq!(writer.copy("x", now), CopyOutcome::Primary);
        assert_eq!(writer.primary.as_ref().unwrap().writes, vec!["x"]);
        assert!(writer.fallback.writes.is_empty());
        assert!(writer.is_copied(now));
    }

    #[test]
    fn absent_primary_uses_fallback_and_shows_indicator() {
        let mut writer: ClipboardWriter<Recording, Recording> =
            ClipboardWriter::new(None, Recording::default(), DEFAULT_FEEDBACK);
        let now = Instant::now();

        assert_eq!(writer.copy("x", now), CopyOutcome::Fallback);
        assert_eq!(writer.fallback.writes, vec!["x"]);
        assert!(writer.is_copied(now));
    }

    #[test]
    fn rejected_primary_falls_back() {
        let mut writer = ClipboardWriter::new(Some(Recording::failing()), Recording::default(), DEFAULT_FEEDBACK);
        assert_eq!(writer.copy("x", Instant::now()), CopyOutcome::Fallback);
        assert_eq!(writer.fallback.writes, vec!["x"]);
    }

    #[test]
    fn fallback_failure_is_swallowed() {
        let mut writer = ClipboardWriter::new(Some(Recording::failing()), Recording::failing(), DEFAULT_FEEDBACK);
        let now = Instant::now();
        assert_eq!(writer.copy("x", now), CopyOutcome::Failed);
        assert!(!writer.is_copied(now));
    }

    #[test]
    fn indicator_resets_after_window() {
        let mut writer: ClipboardWriter<Recording, Recording> =
            ClipboardWriter::new(None, Recording::default(), ms(1500));
        let start = Instant::now();
        writer.copy("x", start);

        assert!(writer.is_copied(start + ms(1499)));
        assert!(!writer.is_copied(start + ms(1500)));
    }

    #[test]
    fn new_copy_replaces_pending_reset() {
        let mut writer: ClipboardWriter<Recording, Recording> =
            ClipboardWriter::new(None, Recording::default(), ms(1500));
        let start = Instant::now();
        writer.copy("a", start);
        writer.copy("b", start + ms(1000));

        // the first reset would have fired at 1500
        assert!(writer.is_copied(start + ms(2000)));
        assert!(!writer.is_copied(start + ms(2500)));
    }

    #[test]
    fn reset_feedback_hides_indicator() {
        let mut writer: ClipboardWriter<Recording, Recording> =
            ClipboardWriter::new(None, Recording::default(), ms(1500));
        let now = Instant::now();
        writer.copy("a", now);
        writer.reset_feedback();
        assert!(!writer.is_copied(now));
    }

    #[test]
    fn formats_summary_with_dashes_for_empty_fields() {
        let el = Element::new("android.widget.Button", Locator::Bounds("[0,0][10,10]".into()))
            .with_text("OK");
        let text = format_for_clipboard(&el, CopyField::All);
        assert_eq!(
            text,
            "Class: android.widget.Button\nID: —\nText: OK\nDescription: —\nBounds: [0,0][10,10]\nClickable: no\nEditable: no\nCheckable: no"
        );
    }

    #[test]
    fn formats_single_fields() {
        let el = Element::new("a.B", Locator::Position("5:7".into())).with_id("com.app:id/ok");
        assert_eq!(format_for_clipboard(&el, CopyField::Id), "com.app:id/ok");
        assert_eq!(format_for_clipboard(&el, CopyField::Locator), "5:7");
        assert_eq!(format_for_clipboard(&el, CopyField::Text), "");
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("bounds".parse::<CopyField>(), Ok(CopyField::Locator));
        assert_eq!("DESC".parse::<CopyField>(), Ok(CopyField::Description));
        assert!("flags".parse::<CopyField>().is_err());
    }
}
