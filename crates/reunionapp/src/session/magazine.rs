//! Magazine board: page budgets, status, task checklist and the derived
//! layout.

use super::{ViewSession, WriteOutcome};
use crate::error::{ReunionError, Result};
use crate::layout::{self, GaugeBand, PageLayout, PageSpan, TargetStatus};
use crate::model::magazine::{MagazineSection, SectionStatus};
use crate::model::{patch, Stored};
use crate::store::DataStore;
use serde::Serialize;

pub type MagazineSession<'s, S> = ViewSession<'s, S, MagazineSection>;

/// One row of the board: the section with its computed page span.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSection {
    pub position: usize,
    #[serde(flatten)]
    pub section: Stored<MagazineSection>,
    pub span: PageSpan,
    pub completed_tasks: usize,
}

/// Everything shown on the magazine screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagazineBoard {
    pub sections: Vec<BoardSection>,
    pub total_pages: f64,
    pub target_pages: f64,
    pub target: TargetStatus,
    pub overflow: f64,
    pub gauge_percent: f64,
    pub gauge_band: GaugeBand,
    pub completion_rate: u32,
}

impl MagazineBoard {
    pub fn from_sections(sections: &[Stored<MagazineSection>]) -> Self {
        let layout = PageLayout::for_sections(sections);
        let rows = sections
            .iter()
            .zip(layout.spans.iter())
            .enumerate()
            .map(|(i, (section, span))| BoardSection {
                position: i + 1,
                completed_tasks: section.record.completed_tasks(),
                section: section.clone(),
                span: *span,
            })
            .collect();
        Self {
            sections: rows,
            total_pages: layout.total_pages,
            target_pages: layout.target_pages,
            target: layout.target,
            overflow: layout.overflow,
            gauge_percent: layout.gauge.display_percent,
            gauge_band: layout.gauge.band,
            completion_rate: layout::completion_rate(sections.iter().map(|s| &s.record.status)),
        }
    }
}

impl<'s, S: DataStore> ViewSession<'s, S, MagazineSection> {
    pub fn layout(&self) -> PageLayout {
        PageLayout::for_sections(&self.items)
    }

    pub fn board(&self) -> MagazineBoard {
        MagazineBoard::from_sections(&self.items)
    }

    pub fn completion_rate(&self) -> u32 {
        layout::completion_rate(self.items.iter().map(|s| &s.record.status))
    }

    /// Step the page budget of `id` by `delta`, snapped and clamped.
    pub fn change_pages(&mut self, id: &str, delta: f64) -> Result<WriteOutcome> {
        let current = self.require(id)?.record.pages;
        let pages = layout::adjust_pages(current, delta);
        if !pages.is_finite() {
            return Err(ReunionError::Validation(format!(
                "Page budget out of range: {} + {}",
                current, delta
            )));
        }
        self.apply(id, patch("pages", pages), |s| s.pages = pages)
    }

    pub fn set_status(&mut self, id: &str, status: SectionStatus) -> Result<WriteOutcome> {
        self.apply(id, patch("status", status.as_str()), |s| s.status = status)
    }

    /// Flip one task's completion flag; the whole task list is written back.
    pub fn toggle_task(&mut self, id: &str, task_id: &str) -> Result<WriteOutcome> {
        let tasks = self
            .require(id)?
            .record
            .with_task_toggled(task_id)
            .ok_or_else(|| ReunionError::Validation(format!("Section has no task '{}'", task_id)))?;
        let value = serde_json::to_value(&tasks)?;
        self.apply(id, patch("tasks", value), |s| s.tasks = tasks)
    }
}
