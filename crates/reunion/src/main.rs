//! # Reunion CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/reunionapp/`: core library with UI-agnostic planning logic
//! - `crates/reunion/`: this CLI, a client of the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/reunion/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal and JSON rendering (render.rs, styles.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/reunionapp/src/api.rs)                   │
//! │  - Parses selectors, statuses and dates                     │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command + Session Layer (crates/reunionapp/src/commands/)  │
//! │  - Optimistic local edits, one store write per action       │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A write that fails is not an error at this level: the library reports it as
//! a warning message next to the (locally updated) view, and the process still
//! exits 0. Only invalid input or an unusable data directory exit 1.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests beside each module against the in-memory store.
//! - **CLI**: `render.rs` is tested with canned `CmdResult` values, and
//!   `tests/cli_e2e.rs` drives the real binary against a temporary data dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
