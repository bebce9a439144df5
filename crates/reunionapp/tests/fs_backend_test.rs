use reunionapp::error::ReunionError;
use reunionapp::model::{Collection, Document, Fields};
use reunionapp::store::backend::StorageBackend;
use reunionapp::store::fs_backend::FsBackend;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

fn doc(id: &str, value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(fields) => Document::new(id, fields),
        _ => panic!("expected object"),
    }
}

#[test]
fn test_missing_collection_is_empty() {
    let (_dir, backend) = setup();
    let docs = backend.load_collection(Collection::Schedule).unwrap();
    assert!(docs.is_empty());
}

#[test]
fn test_save_then_load_keeps_fetch_order() {
    let (_dir, backend) = setup();
    let docs = vec![
        doc("b", json!({"title": "second", "order": 2})),
        doc("a", json!({"title": "first", "order": 1})),
    ];
    backend.save_collection(Collection::Magazine, &docs).unwrap();

    let loaded = backend.load_collection(Collection::Magazine).unwrap();
    assert_eq!(loaded, docs);
}

#[test]
fn test_one_file_per_collection_and_no_tmp_left() {
    let (dir, backend) = setup();
    backend
        .save_collection(Collection::Glossary, &[doc("x", json!({"term": "OB"}))])
        .unwrap();

    let path = dir.path().join("glossary.json");
    assert!(path.exists());
    assert_eq!(backend.location(Collection::Glossary), path.display().to_string());

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!([{"id": "x", "term": "OB"}]));

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_creates_missing_data_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone());
    backend
        .save_collection(Collection::Schedule, &[doc("e", json!({"order": 1}))])
        .unwrap();
    assert!(nested.join("schedule.json").exists());
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("improvements.json"), "{ not json").unwrap();
    let err = backend.load_collection(Collection::Improvements).unwrap_err();
    assert!(matches!(err, ReunionError::Serialization(_)));
}

#[test]
fn test_documents_keep_unknown_fields() {
    let (_dir, backend) = setup();
    let mut fields = Fields::new();
    fields.insert("title".into(), json!("Greeting"));
    fields.insert("legacyFlag".into(), json!(true));
    backend
        .save_collection(Collection::Magazine, &[Document::new("m1", fields.clone())])
        .unwrap();
    let loaded = backend.load_collection(Collection::Magazine).unwrap();
    assert_eq!(loaded[0].fields, fields);
}
