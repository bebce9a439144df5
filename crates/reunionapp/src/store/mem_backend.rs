use super::backend::StorageBackend;
use crate::error::{ReunionError, Result};
use crate::model::{Collection, Document};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since a session is single-threaded.
/// Outages can be switched on to exercise the "log and move on" paths.
#[derive(Default)]
pub struct MemBackend {
    collections: RefCell<HashMap<Collection, Vec<Document>>>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail with `StoreUnavailable`.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Make every read fail with `StoreUnavailable`.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Number of successful `save_collection` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_collection(&self, collection: Collection) -> Result<Vec<Document>> {
        if self.simulate_read_error.get() {
            return Err(ReunionError::StoreUnavailable(
                "Simulated read error".to_string(),
            ));
        }
        let collections = self.collections.borrow();
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    fn save_collection(&self, collection: Collection, docs: &[Document]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ReunionError::StoreUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        self.collections
            .borrow_mut()
            .insert(collection, docs.to_vec());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self, collection: Collection) -> String {
        format!("memory://{}", collection)
    }
}
