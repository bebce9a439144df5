use super::backend::StorageBackend;
use crate::error::{ReunionError, Result};
use crate::model::{Collection, Document};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-per-collection backend: `<root>/<collection>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.name()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ReunionError::unavailable)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_collection(&self, collection: Collection) -> Result<Vec<Document>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(ReunionError::unavailable)?;
        let docs: Vec<Document> =
            serde_json::from_str(&content).map_err(ReunionError::Serialization)?;
        Ok(docs)
    }

    fn save_collection(&self, collection: Collection, docs: &[Document]) -> Result<()> {
        self.ensure_dir()?;

        let target = self.collection_path(collection);
        let content = serde_json::to_string_pretty(docs).map_err(ReunionError::Serialization)?;

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", collection.name(), Uuid::new_v4()));
        fs::write(&tmp, content).map_err(ReunionError::unavailable)?;
        fs::rename(&tmp, &target).map_err(ReunionError::unavailable)?;

        Ok(())
    }

    fn location(&self, collection: Collection) -> String {
        self.collection_path(collection).display().to_string()
    }
}
