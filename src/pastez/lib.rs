//! # Pastez Architecture
//!
//! Pastez is a **client controller for hastebin-style paste servers**. It owns
//! the one document a user is looking at, keeps it in sync with the remote
//! store, and decides which commands make sense at any moment. The CLI is one
//! front end over it; nothing below the CLI knows about terminals.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the current Session, the view and command surface   │
//! │  - Key and click dispatch, notices, external URLs           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (session.rs, commands.rs, view.rs, language.rs)       │
//! │  - Immutable session values and their transitions          │
//! │  - Tag-gated command table, view derivation                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sync (sync.rs) over Storage (store/) and Highlight         │
//! │  - DocumentStore trait: HttpStore, InMemoryStore (testing)  │
//! │  - Highlighter trait: TreeSitterHighlighter                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Returns regular Rust types and `Result`s
//! - **Never** writes to stdout/stderr (diagnostics go through `log`)
//! - **Never** calls `std::process::exit`
//!
//! The only I/O below the CLI is the store itself, and that sits behind a
//! trait so every session and command rule is testable in memory.
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`session.rs`, `commands.rs`, `view.rs`): unit tests of the
//!    rules, using `InMemoryStore` and a stub highlighter.
//! 2. **API** (`api.rs`): scenario tests of whole interactions.
//! 3. **CLI** (`tests/`): argument parsing and output via `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade and dispatcher
//! - [`session`]: Document session state machine
//! - [`sync`]: Fetch and store with rendering
//! - [`commands`]: Command table, tags, shortcuts
//! - [`view`]: Title, location, history, gutter, notices
//! - [`language`]: Extension/language mapping
//! - [`highlight`]: Highlighter trait and tree-sitter implementation
//! - [`store`]: Storage abstraction and backends
//! - [`config`]: Configuration file
//! - [`clipboard`], [`editor`]: Desktop helpers for the CLI

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod language;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;
