//! # CLI Behavior
//!
//! This is **one possible UI client** for reunion, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, the
//! wall clock and output formatting.
//!
//! ## Naked Execution (`reunion`)
//!
//! Running `reunion` with no arguments shows the magazine board, the screen the
//! editors check most.
//!
//! ## Selectors
//!
//! Every command that targets one row takes a selector: the 1-based number
//! printed in front of the row, or the document id shown with `--output json`.
//!
//! ## Module Structure
//!
//! - `commands`: context setup, dispatch and logging init
//! - `render`: output formatting (tables, gauge, messages, JSON)
//! - `setup`: argument parsing via clap, help text
//! - `styles`: terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
