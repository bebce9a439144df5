//! Improvements checklist: status, target date and summary counts.

use super::{ViewSession, WriteOutcome};
use crate::error::Result;
use crate::model::improvements::{display_order, Improvement, ImprovementStats, ImprovementStatus};
use crate::model::{patch, Stored, DATE_FORMAT};
use crate::store::DataStore;
use chrono::NaiveDate;

pub type ImprovementsSession<'s, S> = ViewSession<'s, S, Improvement>;

impl<'s, S: DataStore> ViewSession<'s, S, Improvement> {
    /// Open items first, then by priority.
    pub fn display_items(&self) -> Vec<Stored<Improvement>> {
        display_order(&self.items)
    }

    pub fn stats(&self) -> ImprovementStats {
        ImprovementStats::from_items(&self.items)
    }

    pub fn set_status(&mut self, id: &str, status: ImprovementStatus) -> Result<WriteOutcome> {
        self.apply(id, patch("status", status.as_str()), |i| i.status = status)
    }

    pub fn set_target_date(&mut self, id: &str, date: NaiveDate) -> Result<WriteOutcome> {
        let value = date.format(DATE_FORMAT).to_string();
        self.apply(id, patch("targetDate", value), |i| i.target_date = date)
    }
}
