use crate::commands::{open_session, CmdMessage, CmdResult, View};
use crate::error::Result;
use crate::index::Selector;
use crate::model::schedule::{format_date, is_upcoming, ScheduleEvent};
use crate::model::Stored;
use crate::session::schedule::ScheduleSession;
use crate::store::DataStore;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    pub position: usize,
    #[serde(flatten)]
    pub event: Stored<ScheduleEvent>,
    /// `M/D（曜）`
    pub display_date: String,
    pub upcoming: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub events: Vec<EventRow>,
    pub today: NaiveDate,
    pub window_days: i64,
}

/// What the schedule screen shows as of `today`.
#[derive(Debug, Clone, Copy)]
pub struct Horizon {
    pub today: NaiveDate,
    pub window_days: i64,
}

fn view_of<S: DataStore>(session: &ScheduleSession<'_, S>, horizon: Horizon) -> View {
    let events = session
        .items()
        .iter()
        .enumerate()
        .map(|(i, event)| EventRow {
            position: i + 1,
            display_date: format_date(event.record.date),
            upcoming: is_upcoming(event.record.date, horizon.today, horizon.window_days),
            event: event.clone(),
        })
        .collect();
    View::Schedule(ScheduleView {
        events,
        today: horizon.today,
        window_days: horizon.window_days,
    })
}

pub fn list<S: DataStore>(store: &mut S, horizon: Horizon) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let session: ScheduleSession<'_, S> = open_session(store, &mut result);
    let view = view_of(&session, horizon);
    Ok(result.with_view(view))
}

pub fn note<S: DataStore>(
    store: &mut S,
    selector: &Selector,
    text: &str,
    horizon: Horizon,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: ScheduleSession<'_, S> = open_session(store, &mut result);
    let id = selector.resolve_id(session.items())?;

    let outcome = session.save_notes(&id, text)?;
    let title = session
        .get(&id)
        .map(|e| e.record.title.clone())
        .unwrap_or_default();
    result.record_write(&outcome, format!("Notes saved: {}", title));

    let view = view_of(&session, horizon);
    Ok(result.with_view(view))
}

pub fn add<S: DataStore>(store: &mut S, event: ScheduleEvent, horizon: Horizon) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: ScheduleSession<'_, S> = open_session(store, &mut result);
    let title = event.title.clone();
    session.create(event)?;
    result.add_message(CmdMessage::success(format!("Event added: {}", title)));

    let view = view_of(&session, horizon);
    Ok(result.with_view(view))
}

pub fn remove<S: DataStore>(store: &mut S, selector: &Selector, horizon: Horizon) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: ScheduleSession<'_, S> = open_session(store, &mut result);
    let item = selector.resolve(session.items())?;
    let (id, title) = (item.id.clone(), item.record.title.clone());

    let outcome = session.remove(&id)?;
    result.record_write(&outcome, format!("Event removed: {}", title));

    let view = view_of(&session, horizon);
    Ok(result.with_view(view))
}
