//! Persistence Round-Trip Tests
//!
//! Tests for save/load through the catalog file:
//! - Status and deletion flag survive a save/load cycle
//! - Restored indexes resolve every key
//! - A truncated trailing block is ignored
//! - Malformed blocks report the offending line

use std::fs;

use artcatalog::catalog::{Lookup, NewRecord, RecordStore, Status};
use artcatalog::persistence::{load_all, save_all, PersistenceErrorCode, StoredEntry};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn restore(entries: Vec<StoredEntry>) -> RecordStore {
    RecordStore::restore(entries.into_iter().map(StoredEntry::into_parts)).unwrap()
}

fn gallery() -> RecordStore {
    let mut store = RecordStore::new();
    store
        .insert(NewRecord::new("MONA1503", "MONALISA", 860.5, "1503", Status::OnDisplay))
        .unwrap();
    store
        .insert(NewRecord::new("STAR1889", "STARRY", 100.0, "1889", Status::InMaintenance))
        .unwrap();
    store
        .insert(NewRecord::new("SCRM1893", "SCREAM", 120.25, "", Status::OnDisplay))
        .unwrap();
    store
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_save_load_preserves_records() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.txt");

    let mut store = gallery();
    store.soft_delete(&Lookup::code("SCRM1893")).unwrap();
    save_all(&path, &store).unwrap();

    let loaded = restore(load_all(&path).unwrap());

    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.live_len(), 2);
    assert_eq!(loaded.records(), store.records());

    let starry = loaded.find_by_name("STARRY").unwrap();
    assert_eq!(starry.status(), Status::InMaintenance);
    assert_eq!(starry.year(), "1889");
    assert!(loaded.find_by_code("SCRM1893").is_err());
    assert!(loaded.contains_code("SCRM1893"));
    loaded.verify_consistency().unwrap();
}

#[test]
fn test_compact_then_save_drops_deleted_blocks() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.txt");

    let mut store = gallery();
    store.soft_delete(&Lookup::name("MONALISA")).unwrap();
    store.compact();
    save_all(&path, &store).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("MONA1503"));
    assert!(!content.contains("DELETED"));

    let loaded = restore(load_all(&path).unwrap());
    assert_eq!(loaded.code_keys(), vec!["SCRM1893", "STAR1889"]);
    assert_eq!(loaded.find_by_code("SCRM1893").unwrap().price(), 120.25);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("dir").join("catalog.txt");

    save_all(&path, &gallery()).unwrap();
    assert_eq!(load_all(&path).unwrap().len(), 3);
}

// =============================================================================
// Damaged Files
// =============================================================================

#[test]
fn test_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = load_all(&temp.path().join("absent.txt")).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), PersistenceErrorCode::LoadNotFound);
}

#[test]
fn test_truncated_trailing_block_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.txt");
    save_all(&path, &gallery()).unwrap();

    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("Code: LAST0001\nName: LAST\nPrice: 1\n");
    fs::write(&path, content).unwrap();

    let loaded = restore(load_all(&path).unwrap());
    assert_eq!(loaded.len(), 3);
    assert!(!loaded.contains_code("LAST0001"));
}

#[test]
fn test_malformed_block_reports_line() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.txt");
    fs::write(
        &path,
        "Code: AAAA1111\nName: ALPHA\nPrice: 10\nYear: 1900\nStatus: ON DISPLAY\n\n\
         Code: BBBB2222\nName: BETA\nPrice: ten\nYear: 1900\nStatus: ON DISPLAY\n",
    )
    .unwrap();

    let err = load_all(&path).unwrap_err();
    assert_eq!(err.code(), PersistenceErrorCode::LoadMalformed);
    assert_eq!(err.line(), Some(9));
}
