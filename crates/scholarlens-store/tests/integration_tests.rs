//! Integration tests for scholarlens-store
//!
//! These tests verify the save / restore / clear cycle against SQLite.

use scholarlens_domain::traits::DocumentStore;
use scholarlens_store::SqliteDocumentStore;
use tempfile::TempDir;

#[test]
fn test_store_initialization() {
    let store = SqliteDocumentStore::in_memory();
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_empty_store_has_no_document() {
    let store = SqliteDocumentStore::in_memory().unwrap();
    assert!(store.load_most_recent().unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_save_and_load() {
    let mut store = SqliteDocumentStore::in_memory().unwrap();
    let bytes = vec![0u8, 1, 2, 255];
    store.save("doc-1", "paper.pdf", &bytes).unwrap();

    let doc = store.load_most_recent().unwrap().expect("document stored");
    assert_eq!(doc.id, "doc-1");
    assert_eq!(doc.name, "paper.pdf");
    assert_eq!(doc.bytes, bytes);
}

#[test]
fn test_save_evicts_previous_document() {
    let mut store = SqliteDocumentStore::in_memory().unwrap();
    store.save("doc-1", "first.pdf", b"first").unwrap();
    store.save("doc-2", "second.pdf", b"second").unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let doc = store.load_most_recent().unwrap().unwrap();
    assert_eq!(doc.id, "doc-2");
    assert_eq!(doc.bytes, b"second");
}

#[test]
fn test_resaving_same_id_succeeds() {
    let mut store = SqliteDocumentStore::in_memory().unwrap();
    store.save("doc-1", "paper.pdf", b"v1").unwrap();
    store.save("doc-1", "paper.pdf", b"v2").unwrap();

    let doc = store.load_most_recent().unwrap().unwrap();
    assert_eq!(doc.bytes, b"v2");
}

#[test]
fn test_clear_all() {
    let mut store = SqliteDocumentStore::in_memory().unwrap();
    store.save("doc-1", "paper.pdf", b"bytes").unwrap();
    store.clear_all().unwrap();

    assert!(store.load_most_recent().unwrap().is_none());
    // Clearing an empty store is fine
    store.clear_all().unwrap();
}

#[test]
fn test_document_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("documents.db");

    {
        let mut store = SqliteDocumentStore::open(&path).unwrap();
        store.save("doc-1", "paper.pdf", b"persisted").unwrap();
    }

    let store = SqliteDocumentStore::open(&path).unwrap();
    let doc = store.load_most_recent().unwrap().unwrap();
    assert_eq!(doc.name, "paper.pdf");
    assert_eq!(doc.bytes, b"persisted");
}
