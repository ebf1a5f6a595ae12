//! # Uispect Architecture
//!
//! Uispect is a **session engine for captured Android UI elements**. Capture
//! agents push loosely typed JSON records in; an operator searches them,
//! expands rows to inspect every field and copies fields to the clipboard.
//! The CLI is one client of the library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, renders rows, owns stdout/exit codes   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session + Surface (session.rs, surface.rs)                 │
//! │  - View state: query, expansion, copy feedback              │
//! │  - JSONL command channel from outside the process           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Single owner of the store, the only writer               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) + Normalizer (normalize.rs)       │
//! │  - Ingest, clear, package, search, copy                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - Ordered in-memory entries + package slot                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Whole Batches Only
//!
//! A batch is validated in full before anything is appended. If one record
//! lacks a string `class` or locator, nothing from the batch reaches the store.
//! Optional fields are coerced, never rejected (see [`normalize`]).
//!
//! ## Key Principle: No I/O in Core
//!
//! From `session.rs` inward, code never writes to stdout/stderr and never
//! exits the process. The clipboard is reached through the
//! [`clipboard::ClipboardBackend`] trait so tests can substitute it.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade over commands and store
//! - [`commands`]: Ingestion, search and copy logic
//! - [`normalize`]: Record validation and coercion
//! - [`store`]: Element store trait and in-memory implementation
//! - [`expansion`]: Expanded/collapsed state per element
//! - [`clipboard`]: Two-tier clipboard writer and copy feedback
//! - [`surface`]: External JSONL commands and the stdin listener
//! - [`session`]: Interactive view state
//! - [`config`]: Configuration file
//! - [`model`]: `Element`, `Locator`, `Entry`
//! - [`error`]: Error types
//! - [`logging`]: `tracing` subscriber setup

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod expansion;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod session;
pub mod store;
pub mod surface;
