use crate::commands::{open_session, CmdMessage, CmdResult, View};
use crate::error::Result;
use crate::index::Selector;
use crate::model::glossary::{GlossaryFilter, GlossaryTerm};
use crate::model::Stored;
use crate::session::glossary::GlossarySession;
use crate::store::DataStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRow {
    pub position: usize,
    #[serde(flatten)]
    pub term: Stored<GlossaryTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryView {
    pub terms: Vec<TermRow>,
    /// Every category in the glossary, not just the filtered ones.
    pub categories: Vec<String>,
    pub query: String,
    pub category: Option<String>,
}

fn view_of<S: DataStore>(session: &GlossarySession<'_, S>, filter: &GlossaryFilter) -> View {
    let terms = session
        .filtered(filter)
        .into_iter()
        .enumerate()
        .map(|(i, term)| TermRow {
            position: i + 1,
            term,
        })
        .collect();
    View::Glossary(GlossaryView {
        terms,
        categories: session.categories(),
        query: filter.query.clone(),
        category: filter.category.clone(),
    })
}

pub fn list<S: DataStore>(store: &mut S, filter: &GlossaryFilter) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let session: GlossarySession<'_, S> = open_session(store, &mut result);
    let view = view_of(&session, filter);
    if let View::Glossary(g) = &view {
        if g.terms.is_empty() && !session.items().is_empty() {
            result.add_message(CmdMessage::info("No matching terms"));
        }
    }
    Ok(result.with_view(view))
}

pub fn add<S: DataStore>(store: &mut S, term: GlossaryTerm) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: GlossarySession<'_, S> = open_session(store, &mut result);
    let name = term.term.clone();
    session.create(term)?;
    result.add_message(CmdMessage::success(format!("Term added: {}", name)));

    let view = view_of(&session, &GlossaryFilter::default());
    Ok(result.with_view(view))
}

/// Remove by position in the unfiltered list, or by id.
pub fn remove<S: DataStore>(store: &mut S, selector: &Selector) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut session: GlossarySession<'_, S> = open_session(store, &mut result);
    let item = selector.resolve(session.items())?;
    let (id, name) = (item.id.clone(), item.record.term.clone());

    let outcome = session.remove(&id)?;
    result.record_write(&outcome, format!("Term removed: {}", name));

    let view = view_of(&session, &GlossaryFilter::default());
    Ok(result.with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;
    use crate::store::InMemoryStore;

    fn term(term: &str, reading: Option<&str>, category: &str) -> GlossaryTerm {
        GlossaryTerm {
            term: term.into(),
            reading: reading.map(String::from),
            description: String::new(),
            category: category.into(),
            related_terms: vec!["理事会".into()],
        }
    }

    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        add(&mut store, term("理事会", Some("りじかい"), "組織")).unwrap();
        add(&mut store, term("会長", Some("かいちょう"), "役割")).unwrap();
        add(&mut store, term("総会", None, "同窓会")).unwrap();
        store
    }

    fn names(result: &CmdResult) -> Vec<String> {
        match &result.view {
            Some(View::Glossary(view)) => view.terms.iter().map(|t| t.term.record.term.clone()).collect(),
            other => panic!("expected glossary view, got {:?}", other),
        }
    }

    #[test]
    fn search_matches_reading() {
        let mut store = store();
        let filter = GlossaryFilter::new("かい", None);
        let result = list(&mut store, &filter).unwrap();
        assert_eq!(names(&result), vec!["理事会", "会長"]);
    }

    #[test]
    fn category_filter_keeps_full_category_list() {
        let mut store = store();
        let filter = GlossaryFilter::new("", Some("役割".to_string()));
        let result = list(&mut store, &filter).unwrap();
        assert_eq!(names(&result), vec!["会長"]);
        let Some(View::Glossary(view)) = &result.view else {
            panic!("expected glossary view");
        };
        assert_eq!(view.categories, vec!["組織", "役割", "同窓会"]);
    }

    #[test]
    fn no_matches_is_reported() {
        let mut store = store();
        let result = list(&mut store, &GlossaryFilter::new("zzz", None)).unwrap();
        assert!(names(&result).is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn remove_by_position() {
        let mut store = store();
        let result = remove(&mut store, &Selector::Position(1)).unwrap();
        assert_eq!(names(&result), vec!["会長", "総会"]);
        assert_eq!(store.list_all(Collection::Glossary).unwrap().len(), 2);
    }
}
