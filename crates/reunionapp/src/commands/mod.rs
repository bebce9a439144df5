//! # Command Layer
//!
//! This module contains the **core business logic** of reunion. Each view has
//! its own submodule of pure functions that open a view session over the
//! store, perform one user operation and describe the outcome.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Resolve selectors against the sequence the view displays
//! - Run the operation through a [`ViewSession`](crate::session::ViewSession)
//! - Return structured [`CmdResult`] with the post-operation view and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! Commands explicitly avoid:
//! - **Any I/O**: No stdout, stderr or terminal concerns
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Failed Writes Are Not Errors
//!
//! A store write that fails after the local change was applied is reported as
//! a warning message next to the updated view, not as `Err`. `Err` is kept for
//! problems that stop the operation before anything changes: a bad selector,
//! an unknown status, an invalid date.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! `InMemoryStore`, switching on its simulated outages for the failure paths.
//!
//! ## Command Modules
//!
//! - [`schedule`]: list events, save notes, add and remove events
//! - [`improvements`]: list, set status, set target date, save notes
//! - [`glossary`]: search and filter, add and remove terms
//! - [`magazine`]: board, reorder, page budgets, status, notes, tasks
//! - [`seed`]: fill empty collections with the default content

use crate::model::Record;
use crate::session::{ViewSession, WriteOutcome};
use crate::store::DataStore;
use serde::Serialize;

pub mod glossary;
pub mod improvements;
pub mod magazine;
pub mod schedule;
pub mod seed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The screen a command leaves the user on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum View {
    Schedule(schedule::ScheduleView),
    Improvements(improvements::ImprovementsView),
    Glossary(glossary::GlossaryView),
    Magazine(crate::session::magazine::MagazineBoard),
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(flatten)]
    pub view: Option<View>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = Some(view);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }

    /// Success message for a saved write, warning for a failed one.
    pub(crate) fn record_write(&mut self, outcome: &WriteOutcome, done: impl Into<String>) {
        let done = done.into();
        match outcome {
            WriteOutcome::Saved => self.add_message(CmdMessage::success(done)),
            WriteOutcome::Failed(e) => {
                self.add_message(CmdMessage::warning(format!("{} (not saved: {})", done, e)))
            }
        }
    }
}

/// Open a session, noting a failed load as a warning on `result`.
pub(crate) fn open_session<'s, S: DataStore, T: Record>(
    store: &'s mut S,
    result: &mut CmdResult,
) -> ViewSession<'s, S, T> {
    let session = ViewSession::open(store);
    if let Some(e) = session.load_error() {
        result.add_message(CmdMessage::warning(format!(
            "Could not load {}: {}",
            T::COLLECTION,
            e
        )));
    }
    if session.skipped() > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} {} document(s) could not be read and are not shown",
            session.skipped(),
            T::COLLECTION
        )));
    }
    session
}
