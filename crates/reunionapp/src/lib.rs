//! # reunionapp
//!
//! Planning board library for an alumni association: a yearly event schedule,
//! an improvements checklist, a reference glossary and a magazine production
//! plan with a live page layout.
//!
//! ## Layers
//!
//! ```text
//! UI (CLI, ...)
//!   └── api::ReunionApi        parse inputs, dispatch
//!         └── commands::*      one function per user operation
//!               └── session::ViewSession   loaded items, drafts, optimistic writes
//!                     ├── ordering / layout  pure derivations
//!                     └── store::DataStore   list / update / create / remove / batch
//! ```
//!
//! The library is UI-agnostic and does no terminal I/O. It logs through
//! `tracing`; installing a subscriber is up to the binary.

pub mod api;
pub mod commands;
pub mod config;
pub mod drafts;
pub mod error;
pub mod index;
pub mod init;
pub mod layout;
pub mod model;
pub mod ordering;
pub mod seed;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
