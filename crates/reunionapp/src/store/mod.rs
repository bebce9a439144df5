//! # Storage Layer
//!
//! This module defines the persistence gateway for reunion. The [`DataStore`]
//! trait is the whole contract the rest of the crate relies on: list, get,
//! create, partial update, remove, atomic batch update and seed-if-empty,
//! each keyed by a [`Collection`].
//!
//! ## Split Responsibilities
//!
//! - [`backend::StorageBackend`]: raw I/O of a whole collection (load / save).
//!   Knows nothing about ids, ordering or merging.
//! - [`doc_store::DocStore`]: implements [`DataStore`] over any backend. Owns
//!   id allocation, partial merges, the `order` sort and batch atomicity.
//!
//! ## Ordering
//!
//! `list_all` returns documents sorted ascending by their `order` field. The
//! sort is stable, so equal keys keep fetch order. Documents without an
//! `order` field (the glossary) come after the ordered ones, in fetch order.
//!
//! ## Atomic Batches
//!
//! `batch_update` validates every id before touching anything and then
//! persists the collection with a single backend save. Either every update is
//! visible or none is.
//!
//! ## Seeding
//!
//! `seed_if_empty` writes the defaults in one bulk save only when the
//! collection holds zero documents, so it is safe to call on every start.
//!
//! ## Implementations
//!
//! - [`FileStore`]: production store, one JSON file per collection.
//! - [`InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── reunion.toml        # Optional configuration
//! ├── schedule.json
//! ├── improvements.json
//! ├── glossary.json
//! └── magazine.json
//! ```

use crate::error::Result;
use crate::model::{Collection, Document, Fields};

pub mod backend;
pub mod doc_store;
pub mod fs_backend;
pub mod mem_backend;

pub use doc_store::DocStore;

pub type FileStore = DocStore<fs_backend::FsBackend>;
pub type InMemoryStore = DocStore<mem_backend::MemBackend>;

/// Abstract interface for document storage.
pub trait DataStore {
    /// Every document of the collection, sorted ascending by `order`.
    fn list_all(&self, collection: Collection) -> Result<Vec<Document>>;

    /// A single document by id.
    fn get(&self, collection: Collection, id: &str) -> Result<Document>;

    /// Store a new document with exactly `fields`. Returns the new id.
    fn create(&mut self, collection: Collection, fields: Fields) -> Result<String>;

    /// Merge `fields` into an existing document.
    fn update(&mut self, collection: Collection, id: &str, fields: &Fields) -> Result<()>;

    /// Delete a document permanently.
    fn remove(&mut self, collection: Collection, id: &str) -> Result<()>;

    /// Apply several partial updates as one unit.
    fn batch_update(&mut self, collection: Collection, updates: &[(String, Fields)])
        -> Result<()>;

    /// Insert `defaults` if the collection is empty. Returns whether it seeded.
    fn seed_if_empty(&mut self, collection: Collection, defaults: Vec<Fields>) -> Result<bool>;

    /// Where the collection lives, for display.
    fn location(&self, collection: Collection) -> String;
}
