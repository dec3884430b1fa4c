//! # CLI Behavior
//!
//! This is **one possible front end** for pastez. It is the only place that
//! knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the
//! `pastez` library.
//!
//! ## Commands Map to the Command Surface
//!
//! Each invocation loads at most one document and drives the same
//! commands an interactive front end would:
//!
//! - `pastez new` edits then **Saves** a fresh document.
//! - `pastez dup KEY` loads, **Duplicates**, edits, then **Saves**.
//! - `pastez raw KEY` / `pastez share KEY` click **Raw** / **Share** and
//!   print (or open) the resulting URL.
//!
//! A command that is not available for the loaded document prints a warning
//! instead of failing.
//!
//! ### Text Source for `new`
//!
//! 1. A `FILE` argument.
//! 2. Piped stdin (`cat notes.py | pastez new`). **Skips editor**.
//! 3. Otherwise `$EDITOR` opens on an empty buffer.
//!
//! After a save the page URL is printed and copied to the clipboard
//! (best-effort).
//!
//! ### Missing Documents
//!
//! `pastez get` on a key the server does not have falls back to a new
//! document, prints a note, and exits successfully.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and format output
//! - `render`: Gutter, document and message output
//! - `setup`: Argument parsing via clap, help text
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
