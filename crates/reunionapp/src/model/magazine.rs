//! Magazine production plan records.
//!
//! A [`MagazineSection`] is one entry in the plan: a page budget, a
//! production [`SectionStatus`] and a checklist of [`Task`]s. Page geometry
//! (start/end page, special-zone overlap) is never stored; see
//! [`crate::layout`].

use super::{lenient_date, Annotated, Collection, Record};
use crate::error::{ReunionError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Production state of a section.
///
/// Any state may be selected from any other; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    #[default]
    NotStarted,
    Requesting,
    InProgress,
    Review,
    Done,
}

impl SectionStatus {
    pub const ALL: [SectionStatus; 5] = [
        SectionStatus::NotStarted,
        SectionStatus::Requesting,
        SectionStatus::InProgress,
        SectionStatus::Review,
        SectionStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionStatus::NotStarted => "not-started",
            SectionStatus::Requesting => "requesting",
            SectionStatus::InProgress => "in-progress",
            SectionStatus::Review => "review",
            SectionStatus::Done => "done",
        }
    }

    /// Label shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            SectionStatus::NotStarted => "未着手",
            SectionStatus::Requesting => "依頼中",
            SectionStatus::InProgress => "作成中",
            SectionStatus::Review => "確認中",
            SectionStatus::Done => "完了",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, SectionStatus::Done)
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionStatus {
    type Err = ReunionError;

    fn from_str(s: &str) -> Result<Self> {
        SectionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ReunionError::Validation(format!(
                    "Unknown section status '{}' (expected one of: {})",
                    s,
                    SectionStatus::ALL.map(|st| st.as_str()).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Text,
    Photo,
    Data,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Text => "text",
            TaskKind::Photo => "photo",
            TaskKind::Data => "data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub description: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagazineSection {
    pub title: String,
    /// Page budget in 0.2 steps, at least 0.2.
    pub pages: f64,
    /// Free text in older documents; anything that is not `YYYY-MM-DD` reads as `None`.
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub assignee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_role: Option<String>,
    #[serde(default)]
    pub status: SectionStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_color_page: Option<bool>,
}

impl Record for MagazineSection {
    const COLLECTION: Collection = Collection::Magazine;

    fn order(&self) -> Option<i64> {
        Some(self.order)
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Annotated for MagazineSection {
    fn notes(&self) -> &str {
        &self.notes
    }

    fn set_notes(&mut self, notes: String) {
        self.notes = notes;
    }
}

impl MagazineSection {
    /// Task list with the completion flag of `task_id` flipped.
    /// Returns `None` when the section has no such task.
    pub fn with_task_toggled(&self, task_id: &str) -> Option<Vec<Task>> {
        if !self.tasks.iter().any(|t| t.id == task_id) {
            return None;
        }
        Some(
            self.tasks
                .iter()
                .map(|t| {
                    let mut t = t.clone();
                    if t.id == task_id {
                        t.completed = !t.completed;
                    }
                    t
                })
                .collect(),
        )
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
