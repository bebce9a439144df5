//! # View Sessions
//!
//! A [`ViewSession`] is the in-memory state of one screen for one invocation:
//! the loaded sequence, the per-item note drafts and the transient `saving`
//! flag. It borrows the store for its lifetime and is the only thing that
//! writes through it on behalf of a view.
//!
//! ## Loading
//!
//! [`ViewSession::open`] loads the collection once, sorted by `order`. A store
//! outage does not fail the open: the session comes up empty, the error is
//! logged and kept in [`ViewSession::load_error`]. Documents that do not
//! decode as the view's record type are skipped with a warning and counted in
//! [`ViewSession::skipped`]; reorders still renumber them.
//!
//! ## Optimistic Writes
//!
//! Every mutation changes local state first and then issues exactly one
//! gateway write. A failed write is logged and reported as
//! [`WriteOutcome::Failed`]; the local change is kept, not rolled back. The
//! `saving` flag is raised around each write and cleared whatever the result.
//!
//! Errors that never reach the store (an id the session has not loaded, a
//! task that does not exist) come back as `Err` instead.
//!
//! ## Views
//!
//! The generic operations live here. Each collection adds its own on top:
//!
//! - [`magazine`]: page budgets, status, task checklist, layout
//! - [`improvements`]: status, target date, stats, display order
//! - [`schedule`]: upcoming window
//! - [`glossary`]: search filter and categories

use crate::drafts::DraftBuffer;
use crate::error::{ReunionError, Result};
use crate::model::{
    patch, to_fields, Annotated, Document, Fields, Record, Stored, NOTES_FIELD, ORDER_FIELD,
};
use crate::ordering;
use crate::store::DataStore;
use serde::Serialize;
use tracing::{debug, error, warn};

pub mod glossary;
pub mod improvements;
pub mod magazine;
pub mod schedule;

/// Result of one optimistic write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "lowercase")]
pub enum WriteOutcome {
    Saved,
    /// The store rejected the write; local state keeps the change.
    Failed(String),
}

impl WriteOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, WriteOutcome::Saved)
    }
}

/// Result of a reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "lowercase")]
pub enum MoveOutcome {
    /// Nothing moved and nothing was written.
    Unchanged,
    Saved,
    Failed(String),
}

impl From<WriteOutcome> for MoveOutcome {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Saved => MoveOutcome::Saved,
            WriteOutcome::Failed(e) => MoveOutcome::Failed(e),
        }
    }
}

pub struct ViewSession<'s, S: DataStore, T: Record> {
    store: &'s mut S,
    items: Vec<Stored<T>>,
    drafts: DraftBuffer,
    saving: bool,
    load_error: Option<String>,
    skipped: Vec<Skipped>,
}

/// A stored document the session could not decode.
#[derive(Debug, Clone, PartialEq)]
struct Skipped {
    id: String,
    order: Option<i64>,
}

fn decode<T: Record>(docs: Vec<Document>) -> (Vec<Stored<T>>, Vec<Skipped>) {
    let mut items = Vec::with_capacity(docs.len());
    let mut skipped = Vec::new();
    for doc in docs {
        let id = doc.id.clone();
        let order = doc.order();
        match Stored::from_document(doc) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(collection = %T::COLLECTION, %id, error = %e, "skipping malformed document");
                skipped.push(Skipped { id, order });
            }
        }
    }
    (items, skipped)
}

impl<'s, S: DataStore, T: Record> ViewSession<'s, S, T> {
    pub fn open(store: &'s mut S) -> Self {
        let collection = T::COLLECTION;
        let (items, skipped, load_error) = match store.list_all(collection) {
            Ok(docs) => {
                let (items, skipped) = decode(docs);
                (items, skipped, None)
            }
            Err(e) => {
                error!(%collection, error = %e, "failed to load collection");
                (Vec::new(), Vec::new(), Some(e.to_string()))
            }
        };
        debug!(%collection, count = items.len(), "view session opened");
        Self {
            store,
            items,
            drafts: DraftBuffer::new(),
            saving: false,
            load_error,
            skipped,
        }
    }

    /// Loaded items in stored order.
    pub fn items(&self) -> &[Stored<T>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Stored<T>> {
        self.items
    }

    pub fn get(&self, id: &str) -> Option<&Stored<T>> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Why the initial load came up empty, if it failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Number of stored documents that could not be decoded.
    pub fn skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn location(&self) -> String {
        self.store.location(T::COLLECTION)
    }

    fn require(&self, id: &str) -> Result<&Stored<T>> {
        self.get(id)
            .ok_or_else(|| ReunionError::not_found(T::COLLECTION, id))
    }

    /// Run one gateway write with the `saving` flag raised.
    fn write(&mut self, id: &str, op: impl FnOnce(&mut S) -> Result<()>) -> WriteOutcome {
        self.saving = true;
        let result = op(&mut *self.store);
        self.saving = false;
        match result {
            Ok(()) => WriteOutcome::Saved,
            Err(e) => {
                warn!(collection = %T::COLLECTION, %id, error = %e, "write failed, keeping local change");
                WriteOutcome::Failed(e.to_string())
            }
        }
    }

    /// Apply `change` locally, then persist `fields` for `id`.
    pub fn apply(
        &mut self,
        id: &str,
        fields: Fields,
        change: impl FnOnce(&mut T),
    ) -> Result<WriteOutcome> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ReunionError::not_found(T::COLLECTION, id))?;
        change(&mut item.record);
        let collection = T::COLLECTION;
        Ok(self.write(id, |store| store.update(collection, id, &fields)))
    }

    /// Store a new record and append it to the session.
    ///
    /// Ordered records are placed after the current last item. Creation needs
    /// the store-assigned id, so unlike the other writes a failure here is an
    /// `Err` and nothing is added locally.
    pub fn create(&mut self, mut record: T) -> Result<String> {
        if record.order().is_some() {
            record.set_order(ordering::next_order(&self.items));
        }
        let fields = to_fields(&record)?;

        self.saving = true;
        let result = self.store.create(T::COLLECTION, fields);
        self.saving = false;

        let id = result?;
        self.items.push(Stored::new(id.clone(), record));
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<WriteOutcome> {
        let pos = self
            .position(id)
            .ok_or_else(|| ReunionError::not_found(T::COLLECTION, id))?;
        self.items.remove(pos);
        self.drafts.take(id);
        let collection = T::COLLECTION;
        Ok(self.write(id, |store| store.remove(collection, id)))
    }

    /// Move `moved_id` onto `target_id` and persist the full new order.
    ///
    /// Undecodable documents keep their place in the key space: they are
    /// renumbered after the loaded items, so no two documents share an order.
    pub fn reorder(&mut self, moved_id: &str, target_id: &str) -> MoveOutcome {
        let Some(next) = ordering::plan_move(&self.items, moved_id, target_id) else {
            debug!(collection = %T::COLLECTION, moved_id, target_id, "reorder is a no-op");
            return MoveOutcome::Unchanged;
        };
        let mut updates = ordering::order_updates(&next);
        let mut order = next.len() as i64;
        for doc in self.skipped.iter_mut().filter(|d| d.order.is_some()) {
            order += 1;
            doc.order = Some(order);
            updates.push((doc.id.clone(), patch(ORDER_FIELD, order)));
        }
        self.items = next;
        let collection = T::COLLECTION;
        self.write(moved_id, |store| store.batch_update(collection, &updates))
            .into()
    }
}

impl<'s, S: DataStore, T: Annotated> ViewSession<'s, S, T> {
    pub fn edit_draft(&mut self, id: &str, text: impl Into<String>) -> Result<()> {
        self.require(id)?;
        self.drafts.edit(id, text);
        Ok(())
    }

    /// Draft text for `id`, falling back to the persisted notes.
    pub fn draft(&self, id: &str) -> Option<&str> {
        self.get(id)
            .map(|item| self.drafts.text_or(id, item.record.notes()))
    }

    pub fn is_dirty(&self, id: &str) -> bool {
        self.get(id)
            .is_some_and(|item| self.drafts.is_dirty(id, item.record.notes()))
    }

    /// Write the draft for `id` to the `notes` field.
    pub fn save_draft(&mut self, id: &str) -> Result<WriteOutcome> {
        let text = self
            .draft(id)
            .ok_or_else(|| ReunionError::not_found(T::COLLECTION, id))?
            .to_string();
        let outcome = self.apply(id, patch(NOTES_FIELD, text.clone()), |r| {
            r.set_notes(text)
        })?;
        self.drafts.take(id);
        Ok(outcome)
    }

    /// Edit and save in one step.
    pub fn save_notes(&mut self, id: &str, text: impl Into<String>) -> Result<WriteOutcome> {
        self.edit_draft(id, text)?;
        self.save_draft(id)
    }
}
