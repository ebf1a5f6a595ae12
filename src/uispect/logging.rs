//! Diagnostic logging.
//!
//! Operator-facing outcomes are [`crate::commands::CmdMessage`]s and are
//! printed by the CLI. Everything else (batch rejections, clipboard tier
//! selection, listener lifecycle) goes through `tracing` to stderr.
//!
//! `RUST_LOG` wins when set; otherwise only warnings are shown, or debug output
//! for this crate with `--verbose`.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(verbose: bool) {
    let default_directive = if verbose { "uispect=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
