//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for all reunion operations, regardless of the UI being
//! used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (selectors, status names and dates arrive as text)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//! - **Reading the clock**: callers pass `today`, so results are reproducible
//!
//! ## Generic Over DataStore
//!
//! `ReunionApi<S: DataStore>` is generic over the storage backend:
//! - Production: `ReunionApi<FileStore>`
//! - Testing: `ReunionApi<InMemoryStore>`

use crate::commands;
use crate::commands::schedule::Horizon;
use crate::error::Result;
use crate::index::Selector;
use crate::model::glossary::{GlossaryFilter, GlossaryTerm};
use crate::model::improvements::ImprovementStatus;
use crate::model::magazine::SectionStatus;
use crate::model::schedule::{ScheduleEvent, UPCOMING_WINDOW_DAYS};
use crate::model::{parse_date, Collection};
use crate::store::DataStore;
use chrono::NaiveDate;

/// The main API facade for reunion operations.
pub struct ReunionApi<S: DataStore> {
    store: S,
    upcoming_window_days: i64,
}

impl<S: DataStore> ReunionApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            upcoming_window_days: UPCOMING_WINDOW_DAYS,
        }
    }

    pub fn with_upcoming_window(mut self, days: i64) -> Self {
        self.upcoming_window_days = days;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn location(&self, collection: Collection) -> String {
        self.store.location(collection)
    }

    fn horizon(&self, today: NaiveDate) -> Horizon {
        Horizon {
            today,
            window_days: self.upcoming_window_days,
        }
    }

    // --- schedule ---

    pub fn schedule(&mut self, today: NaiveDate) -> Result<commands::CmdResult> {
        let horizon = self.horizon(today);
        commands::schedule::list(&mut self.store, horizon)
    }

    pub fn schedule_note(
        &mut self,
        selector: &str,
        text: &str,
        today: NaiveDate,
    ) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        let horizon = self.horizon(today);
        commands::schedule::note(&mut self.store, &selector, text, horizon)
    }

    pub fn add_event(
        &mut self,
        event: ScheduleEvent,
        today: NaiveDate,
    ) -> Result<commands::CmdResult> {
        let horizon = self.horizon(today);
        commands::schedule::add(&mut self.store, event, horizon)
    }

    pub fn remove_event(&mut self, selector: &str, today: NaiveDate) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        let horizon = self.horizon(today);
        commands::schedule::remove(&mut self.store, &selector, horizon)
    }

    // --- improvements ---

    pub fn improvements(&mut self) -> Result<commands::CmdResult> {
        commands::improvements::list(&mut self.store)
    }

    pub fn set_improvement_status(
        &mut self,
        selector: &str,
        status: &str,
    ) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        let status: ImprovementStatus = status.parse()?;
        commands::improvements::set_status(&mut self.store, &selector, status)
    }

    pub fn set_improvement_target(
        &mut self,
        selector: &str,
        date: &str,
    ) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        let date = parse_date(date)?;
        commands::improvements::set_target_date(&mut self.store, &selector, date)
    }

    pub fn improvement_note(&mut self, selector: &str, text: &str) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::improvements::note(&mut self.store, &selector, text)
    }

    // --- glossary ---

    pub fn glossary(
        &mut self,
        query: &str,
        category: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let filter = GlossaryFilter::new(query, category.map(str::to_string));
        commands::glossary::list(&mut self.store, &filter)
    }

    pub fn add_term(&mut self, term: GlossaryTerm) -> Result<commands::CmdResult> {
        commands::glossary::add(&mut self.store, term)
    }

    pub fn remove_term(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::glossary::remove(&mut self.store, &selector)
    }

    // --- magazine ---

    pub fn magazine(&mut self) -> Result<commands::CmdResult> {
        commands::magazine::show(&mut self.store)
    }

    pub fn move_section(&mut self, moved: &str, target: &str) -> Result<commands::CmdResult> {
        let moved: Selector = moved.parse()?;
        let target: Selector = target.parse()?;
        commands::magazine::move_section(&mut self.store, &moved, &target)
    }

    pub fn change_pages(&mut self, selector: &str, delta: f64) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::magazine::change_pages(&mut self.store, &selector, delta)
    }

    pub fn set_section_status(
        &mut self,
        selector: &str,
        status: &str,
    ) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        let status: SectionStatus = status.parse()?;
        commands::magazine::set_status(&mut self.store, &selector, status)
    }

    pub fn section_note(&mut self, selector: &str, text: &str) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::magazine::note(&mut self.store, &selector, text)
    }

    pub fn toggle_task(&mut self, selector: &str, task: &str) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        let task: Selector = task.parse()?;
        commands::magazine::toggle_task(&mut self.store, &selector, &task)
    }

    // --- maintenance ---

    pub fn seed(&mut self) -> Result<commands::CmdResult> {
        commands::seed::run(&mut self.store)
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel, View};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReunionError;
    use crate::store::InMemoryStore;

    fn api() -> ReunionApi<InMemoryStore> {
        let mut api = ReunionApi::new(InMemoryStore::new());
        api.seed().unwrap();
        api
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()
    }

    #[test]
    fn unknown_status_is_rejected_before_the_store() {
        let mut api = api();
        let saves = api.store().backend().save_count();
        let err = api.set_section_status("1", "finished").unwrap_err();
        assert!(matches!(err, ReunionError::Validation(_)));
        let err = api.set_improvement_status("1", "closed").unwrap_err();
        assert!(matches!(err, ReunionError::Validation(_)));
        assert_eq!(api.store().backend().save_count(), saves);
    }

    #[test]
    fn bad_dates_and_selectors_are_rejected() {
        let mut api = api();
        assert!(api.set_improvement_target("1", "next week").is_err());
        assert!(matches!(
            api.section_note("0", "x"),
            Err(ReunionError::Api(_))
        ));
    }

    #[test]
    fn window_comes_from_the_api() {
        let mut api = api().with_upcoming_window(0);
        let result = api.schedule(today()).unwrap();
        let Some(View::Schedule(view)) = result.view else {
            panic!("expected schedule view");
        };
        assert_eq!(view.window_days, 0);
        assert!(view.events.iter().all(|e| !e.upcoming));
    }

    #[test]
    fn seeded_board_is_at_target() {
        let mut api = api();
        let result = api.magazine().unwrap();
        let Some(View::Magazine(board)) = result.view else {
            panic!("expected magazine board");
        };
        assert_eq!(board.total_pages, 14.0);
    }

    #[test]
    fn glossary_filter_passthrough() {
        let mut api = api();
        let result = api.glossary("", Some("役割")).unwrap();
        let Some(View::Glossary(view)) = result.view else {
            panic!("expected glossary view");
        };
        assert!(view.terms.iter().all(|t| t.term.record.category == "役割"));
        assert!(!view.terms.is_empty());
    }
}
