use crate::commands::{open_session, CmdResult, View};
use crate::error::Result;
use crate::index::Selector;
use crate::model::improvements::{Improvement, ImprovementStats, ImprovementStatus};
use crate::model::{Stored, DATE_FORMAT};
use crate::session::improvements::ImprovementsSession;
use crate::store::DataStore;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementRow {
    /// Position in display order, which is what selectors refer to.
    pub position: usize,
    #[serde(flatten)]
    pub item: Stored<Improvement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementsView {
    pub items: Vec<ImprovementRow>,
    pub stats: ImprovementStats,
}

fn view_of<S: DataStore>(session: &ImprovementsSession<'_, S>) -> View {
    let items = session
        .display_items()
        .into_iter()
        .enumerate()
        .map(|(i, item)| ImprovementRow {
            position: i + 1,
            item,
        })
        .collect();
    View::Improvements(ImprovementsView {
        items,
        stats: session.stats(),
    })
}

/// Resolve against the display order and return `(id, title)`.
fn target<S: DataStore>(
    session: &ImprovementsSession<'_, S>,
    selector: &Selector,
) -> Result<(String, String)> {
    let displayed = session.display_items();
    let item = selector.resolve(&displayed)?;
    Ok((item.id.clone(), item.record.title.clone()))
}

pub fn list<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let session: ImprovementsSession<'_, S> = open_session(store, &mut result);
    let view = view_of(&session);
    Ok(result.with_view(view))
}

pub fn set_status<S: DataStore>(
    store: &mut S,
    selector: &Selector,
    status: ImprovementStatus,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: ImprovementsSession<'_, S> = open_session(store, &mut result);
    let (id, title) = target(&session, selector)?;

    let outcome = session.set_status(&id, status)?;
    result.record_write(&outcome, format!("{}: {}", title, status.label()));

    let view = view_of(&session);
    Ok(result.with_view(view))
}

pub fn set_target_date<S: DataStore>(
    store: &mut S,
    selector: &Selector,
    date: NaiveDate,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: ImprovementsSession<'_, S> = open_session(store, &mut result);
    let (id, title) = target(&session, selector)?;

    let outcome = session.set_target_date(&id, date)?;
    result.record_write(
        &outcome,
        format!("{}: target {}", title, date.format(DATE_FORMAT)),
    );

    let view = view_of(&session);
    Ok(result.with_view(view))
}

pub fn note<S: DataStore>(store: &mut S, selector: &Selector, text: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: ImprovementsSession<'_, S> = open_session(store, &mut result);
    let (id, title) = target(&session, selector)?;

    let outcome = session.save_notes(&id, text)?;
    result.record_write(&outcome, format!("Notes saved: {}", title));

    let view = view_of(&session);
    Ok(result.with_view(view))
}
