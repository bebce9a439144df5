use crate::commands::{open_session, CmdMessage, CmdResult, View};
use crate::error::{ReunionError, Result};
use crate::index::Selector;
use crate::model::magazine::{MagazineSection, SectionStatus};
use crate::session::magazine::MagazineSession;
use crate::session::MoveOutcome;
use crate::store::DataStore;

fn board<S: DataStore>(session: &MagazineSession<'_, S>) -> View {
    View::Magazine(session.board())
}

fn title_of<S: DataStore>(session: &MagazineSession<'_, S>, id: &str) -> String {
    session
        .get(id)
        .map(|s| s.record.title.clone())
        .unwrap_or_default()
}

/// Task id for a 1-based task number or a task id.
fn task_id(section: &MagazineSection, task: &Selector) -> Result<String> {
    let found = match task {
        Selector::Position(n) => section.tasks.get(n - 1),
        Selector::Id(id) => section.tasks.iter().find(|t| &t.id == id),
    };
    found.map(|t| t.id.clone()).ok_or_else(|| {
        ReunionError::Validation(format!(
            "{} has no task {} ({} tasks)",
            section.title,
            task,
            section.tasks.len()
        ))
    })
}

pub fn show<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let session: MagazineSession<'_, S> = open_session(store, &mut result);
    let view = board(&session);
    Ok(result.with_view(view))
}

/// Move `moved` onto the row currently at `target`.
pub fn move_section<S: DataStore>(
    store: &mut S,
    moved: &Selector,
    target: &Selector,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: MagazineSession<'_, S> = open_session(store, &mut result);
    let moved_id = moved.resolve_id(session.items())?;
    let target_id = target.resolve_id(session.items())?;
    let title = title_of(&session, &moved_id);

    match session.reorder(&moved_id, &target_id) {
        MoveOutcome::Unchanged => {
            result.add_message(CmdMessage::info(format!("{} is already there", title)))
        }
        MoveOutcome::Saved => {
            let position = session.position(&moved_id).map_or(0, |p| p + 1);
            result.add_message(CmdMessage::success(format!(
                "Moved {} to position {}",
                title, position
            )))
        }
        MoveOutcome::Failed(e) => result.add_message(CmdMessage::warning(format!(
            "Moved {} (not saved: {})",
            title, e
        ))),
    }

    let view = board(&session);
    Ok(result.with_view(view))
}

/// Step the page budget by `delta` (normally ±0.2).
pub fn change_pages<S: DataStore>(
    store: &mut S,
    selector: &Selector,
    delta: f64,
) -> Result<CmdResult> {
    if !delta.is_finite() {
        return Err(ReunionError::Validation(format!(
            "Invalid page delta: {}",
            delta
        )));
    }
    let mut result = CmdResult::default();
    let mut session: MagazineSession<'_, S> = open_session(store, &mut result);
    let id = selector.resolve_id(session.items())?;

    let outcome = session.change_pages(&id, delta)?;
    let pages = session.get(&id).map_or(0.0, |s| s.record.pages);
    result.record_write(
        &outcome,
        format!("{}: {:.1} pages", title_of(&session, &id), pages),
    );

    let view = board(&session);
    Ok(result.with_view(view))
}

pub fn set_status<S: DataStore>(
    store: &mut S,
    selector: &Selector,
    status: SectionStatus,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: MagazineSession<'_, S> = open_session(store, &mut result);
    let id = selector.resolve_id(session.items())?;

    let outcome = session.set_status(&id, status)?;
    result.record_write(
        &outcome,
        format!("{}: {}", title_of(&session, &id), status.label()),
    );

    let view = board(&session);
    Ok(result.with_view(view))
}

pub fn note<S: DataStore>(store: &mut S, selector: &Selector, text: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: MagazineSession<'_, S> = open_session(store, &mut result);
    let id = selector.resolve_id(session.items())?;

    let outcome = session.save_notes(&id, text)?;
    result.record_write(
        &outcome,
        format!("Notes saved: {}", title_of(&session, &id)),
    );

    let view = board(&session);
    Ok(result.with_view(view))
}

/// Flip the completion flag of one task in a section.
pub fn toggle_task<S: DataStore>(
    store: &mut S,
    selector: &Selector,
    task: &Selector,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: MagazineSession<'_, S> = open_session(store, &mut result);
    let section = selector.resolve(session.items())?;
    let id = section.id.clone();
    let task_id = task_id(&section.record, task)?;

    let outcome = session.toggle_task(&id, &task_id)?;
    let summary = session
        .get(&id)
        .and_then(|s| s.record.tasks.iter().find(|t| t.id == task_id))
        .map(|t| {
            let mark = if t.completed { "done" } else { "open" };
            format!("{} ({})", t.description, mark)
        })
        .unwrap_or_default();
    result.record_write(&outcome, summary);

    let view = board(&session);
    Ok(result.with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::layout::TargetStatus;
    use crate::model::magazine::{Task, TaskKind};
    use crate::model::{patch, to_fields, Collection};
    use crate::session::magazine::MagazineBoard;
    use crate::test_utils::{magazine_store, section};
    use serde_json::json;

    fn board_of(result: &CmdResult) -> &MagazineBoard {
        match &result.view {
            Some(View::Magazine(board)) => board,
            other => panic!("expected magazine board, got {:?}", other),
        }
    }

    fn titles(result: &CmdResult) -> Vec<&str> {
        board_of(result)
            .sections
            .iter()
            .map(|s| s.section.record.title.as_str())
            .collect()
    }

    #[test]
    fn show_reports_layout() {
        let mut store = magazine_store(&[("A", 2.0), ("B", 1.0), ("C", 3.0)]);
        let result = show(&mut store).unwrap();
        let board = board_of(&result);
        let ends: Vec<f64> = board.sections.iter().map(|s| s.span.end).collect();
        assert_eq!(ends, vec![3.0, 4.0, 7.0]);
        assert_eq!(board.total_pages, 6.0);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn move_first_onto_third() {
        let mut store = magazine_store(&[("A", 1.0), ("B", 1.0), ("C", 1.0), ("D", 1.0)]);
        let result =
            move_section(&mut store, &Selector::Position(1), &Selector::Position(3)).unwrap();
        assert_eq!(titles(&result), vec!["B", "C", "A", "D"]);
        assert!(result.messages[0].content.contains("position 3"));

        let again = show(&mut store).unwrap();
        assert_eq!(titles(&again), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn move_onto_itself_is_info_only() {
        let mut store = magazine_store(&[("A", 1.0), ("B", 1.0)]);
        let saves = store.backend().save_count();
        let result =
            move_section(&mut store, &Selector::Position(2), &Selector::Position(2)).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(store.backend().save_count(), saves);
    }

    #[test]
    fn pages_step_moves_the_target_status() {
        let mut store = magazine_store(&[("A", 10.0), ("B", 3.8)]);
        let result = change_pages(&mut store, &Selector::Position(2), 0.2).unwrap();
        assert_eq!(board_of(&result).target, TargetStatus::At);
        let result = change_pages(&mut store, &Selector::Position(2), 0.2).unwrap();
        let board = board_of(&result);
        assert_eq!(board.target, TargetStatus::Over);
        assert_eq!(board.overflow, 0.2);
    }

    #[test]
    fn pages_rejects_nan() {
        let mut store = magazine_store(&[("A", 1.0)]);
        assert!(change_pages(&mut store, &Selector::Position(1), f64::NAN).is_err());
    }

    #[test]
    fn pages_rejects_overflowing_delta_without_writing() {
        let mut store = magazine_store(&[("A", 1.0), ("B", 1.0)]);
        let saves = store.backend().save_count();
        let err = change_pages(&mut store, &Selector::Position(1), 1e308).unwrap_err();
        assert!(matches!(err, ReunionError::Validation(_)));
        assert_eq!(store.backend().save_count(), saves);

        let result = show(&mut store).unwrap();
        assert_eq!(board_of(&result).sections.len(), 2);
        assert_eq!(board_of(&result).total_pages, 2.0);
    }

    #[test]
    fn blank_deadline_keeps_section_on_the_board() {
        let mut store = magazine_store(&[("A", 2.0), ("B", 1.0), ("C", 3.0)]);
        let a = store.list_all(Collection::Magazine).unwrap()[0].id.clone();
        store
            .update(Collection::Magazine, &a, &patch("deadline", ""))
            .unwrap();

        let result = show(&mut store).unwrap();
        let board = board_of(&result);
        let starts: Vec<f64> = board.sections.iter().map(|s| s.span.start).collect();
        assert_eq!(starts, vec![1.0, 3.0, 4.0]);
        assert_eq!(board.total_pages, 6.0);
        assert!(!result.has_warnings());

        move_section(&mut store, &Selector::Position(3), &Selector::Position(2)).unwrap();
        let orders: Vec<i64> = store
            .list_all(Collection::Magazine)
            .unwrap()
            .iter()
            .filter_map(|d| d.order())
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn unreadable_section_is_reported() {
        let mut store = magazine_store(&[("A", 1.0), ("B", 1.0)]);
        let a = store.list_all(Collection::Magazine).unwrap()[0].id.clone();
        store
            .update(Collection::Magazine, &a, &patch("pages", serde_json::Value::Null))
            .unwrap();
        let result = show(&mut store).unwrap();
        assert_eq!(board_of(&result).sections.len(), 1);
        assert!(result.has_warnings());
        assert!(result.messages[0].content.contains("could not be read"));
    }

    #[test]
    fn failed_write_keeps_local_board_and_warns() {
        let mut store = magazine_store(&[("A", 1.0), ("B", 1.0)]);
        store.backend().set_simulate_write_error(true);
        let result = change_pages(&mut store, &Selector::Position(1), 0.2).unwrap();
        assert!(result.has_warnings());
        assert_eq!(board_of(&result).sections[1].span.start, 2.2);
    }

    #[test]
    fn status_and_notes() {
        let mut store = magazine_store(&[("A", 1.0), ("B", 1.0)]);
        let result = set_status(&mut store, &Selector::Position(1), SectionStatus::Done).unwrap();
        assert_eq!(board_of(&result).completion_rate, 50);
        assert!(result.messages[0].content.contains("完了"));

        let result = note(&mut store, &Selector::Position(2), "waiting on photos").unwrap();
        assert_eq!(
            board_of(&result).sections[1].section.record.notes,
            "waiting on photos"
        );
    }

    #[test]
    fn toggle_task_by_number() {
        let mut store = magazine_store(&[]);
        let mut s = section("Photos", 2.0, 1);
        s.tasks = vec![
            Task {
                id: "t1".into(),
                kind: TaskKind::Photo,
                description: "Select photos".into(),
                assignee: String::new(),
                completed: false,
            },
            Task {
                id: "t2".into(),
                kind: TaskKind::Text,
                description: "Captions".into(),
                assignee: String::new(),
                completed: false,
            },
        ];
        let id = store
            .create(Collection::Magazine, to_fields(&s).unwrap())
            .unwrap();

        let result = toggle_task(&mut store, &Selector::Position(1), &Selector::Position(2)).unwrap();
        assert!(result.messages[0].content.contains("Captions (done)"));
        assert_eq!(board_of(&result).sections[0].completed_tasks, 1);

        let doc = store.get(Collection::Magazine, &id).unwrap();
        assert_eq!(doc.fields["tasks"][1]["completed"], json!(true));

        assert!(toggle_task(&mut store, &Selector::Position(1), &Selector::Position(3)).is_err());
    }
}
