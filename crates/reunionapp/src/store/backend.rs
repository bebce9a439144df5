use crate::error::Result;
use crate::model::{Collection, Document};

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while DocStore handles the "what" (ids, merging, ordering, atomic batches).
pub trait StorageBackend {
    /// Load every document of a collection, in fetch (insertion) order.
    /// A collection that was never written is empty, not an error.
    fn load_collection(&self, collection: Collection) -> Result<Vec<Document>>;

    /// Replace the stored contents of a collection.
    /// MUST be atomic: readers see either the old or the new list, never a mix.
    fn save_collection(&self, collection: Collection, docs: &[Document]) -> Result<()>;

    /// Human-readable location of a collection (file path, `memory://...`).
    fn location(&self, collection: Collection) -> String;
}
