use crate::model::magazine::{MagazineSection, SectionStatus};
use crate::model::{to_fields, Collection};
use crate::store::{DataStore, FileStore, InMemoryStore};
use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::open(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }
}

pub fn section(title: &str, pages: f64, order: i64) -> MagazineSection {
    MagazineSection {
        title: title.to_string(),
        pages,
        deadline: NaiveDate::from_ymd_opt(2026, 3, 31),
        assignee: "Office".to_string(),
        assignee_role: None,
        status: SectionStatus::NotStarted,
        notes: String::new(),
        tasks: Vec::new(),
        order,
        is_color_page: None,
    }
}

/// An in-memory store holding one magazine section per `(title, pages)`,
/// ordered as given.
pub fn magazine_store(sections: &[(&str, f64)]) -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for (i, (title, pages)) in sections.iter().enumerate() {
        let fields = to_fields(&section(title, *pages, i as i64 + 1)).expect("section fields");
        store
            .create(Collection::Magazine, fields)
            .expect("create section");
    }
    store
}
