use super::backend::StorageBackend;
use super::fs_backend::FsBackend;
use super::mem_backend::MemBackend;
use super::DataStore;
use crate::error::{ReunionError, Result};
use crate::model::{Collection, Document, Fields};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;

/// Length of store-assigned identifiers.
pub const ID_LEN: usize = 20;

pub struct DocStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> DocStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load(&self, collection: Collection) -> Result<Vec<Document>> {
        self.backend.load_collection(collection)
    }
}

impl DocStore<MemBackend> {
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl Default for DocStore<MemBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl DocStore<FsBackend> {
    pub fn open(root: PathBuf) -> Self {
        Self::with_backend(FsBackend::new(root))
    }
}

/// Allocate an id not present in `taken`.
fn new_id(taken: &HashSet<&str>) -> String {
    loop {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}

/// Stable sort by `order`; unordered documents go last in fetch order.
pub(crate) fn sort_by_order(docs: &mut [Document]) {
    docs.sort_by_key(|d| match d.order() {
        Some(order) => (false, order),
        None => (true, 0),
    });
}

impl<B: StorageBackend> DataStore for DocStore<B> {
    fn list_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let mut docs = self.load(collection)?;
        sort_by_order(&mut docs);
        Ok(docs)
    }

    fn get(&self, collection: Collection, id: &str) -> Result<Document> {
        self.load(collection)?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ReunionError::not_found(collection, id))
    }

    fn create(&mut self, collection: Collection, fields: Fields) -> Result<String> {
        let mut docs = self.load(collection)?;
        let id = {
            let taken: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
            new_id(&taken)
        };
        docs.push(Document::new(id.clone(), fields));
        self.backend.save_collection(collection, &docs)?;
        debug!(%collection, %id, "created document");
        Ok(id)
    }

    fn update(&mut self, collection: Collection, id: &str, fields: &Fields) -> Result<()> {
        let mut docs = self.load(collection)?;
        let doc = docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ReunionError::not_found(collection, id))?;
        doc.merge(fields);
        self.backend.save_collection(collection, &docs)?;
        debug!(%collection, %id, fields = fields.len(), "updated document");
        Ok(())
    }

    fn remove(&mut self, collection: Collection, id: &str) -> Result<()> {
        let mut docs = self.load(collection)?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(ReunionError::not_found(collection, id));
        }
        self.backend.save_collection(collection, &docs)?;
        debug!(%collection, %id, "removed document");
        Ok(())
    }

    fn batch_update(
        &mut self,
        collection: Collection,
        updates: &[(String, Fields)],
    ) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let mut docs = self.load(collection)?;

        // Validate everything before touching anything.
        for (id, _) in updates {
            if !docs.iter().any(|d| &d.id == id) {
                return Err(ReunionError::not_found(collection, id.as_str()));
            }
        }

        for (id, fields) in updates {
            if let Some(doc) = docs.iter_mut().find(|d| &d.id == id) {
                doc.merge(fields);
            }
        }

        self.backend.save_collection(collection, &docs)?;
        debug!(%collection, count = updates.len(), "batch update committed");
        Ok(())
    }

    fn seed_if_empty(&mut self, collection: Collection, defaults: Vec<Fields>) -> Result<bool> {
        let mut docs = self.load(collection)?;
        if !docs.is_empty() {
            return Ok(false);
        }
        for fields in defaults {
            let id = {
                let taken: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
                new_id(&taken)
            };
            docs.push(Document::new(id, fields));
        }
        self.backend.save_collection(collection, &docs)?;
        info!(%collection, count = docs.len(), "initialized collection with default data");
        Ok(true)
    }

    fn location(&self, collection: Collection) -> String {
        self.backend.location(collection)
    }
}
