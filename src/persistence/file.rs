//! Catalog file load / save
//!
//! Saving rewrites the whole file and syncs it before returning. There is
//! no write-ahead protection: a crash mid-write can leave a truncated file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::catalog::RecordStore;
use crate::observability::{Event, Logger};

use super::errors::{LoadError, PersistenceError, SaveError};
use super::format::{check_writable, parse, write_records, StoredEntry};

/// Read every complete record block from `path`.
///
/// A missing file is reported as `LOAD_NOT_FOUND` so the caller can decide
/// to start with an empty catalog.
pub fn load_all(path: &Path) -> Result<Vec<StoredEntry>, LoadError> {
    let file = File::open(path).map_err(|e| {
        let message = format!("Failed to open catalog file: {}", path.display());
        if e.kind() == ErrorKind::NotFound {
            PersistenceError::not_found(message, e)
        } else {
            PersistenceError::load_io(message, e)
        }
    })?;

    let entries = parse(BufReader::new(file))?;

    Logger::info(
        Event::CatalogLoaded.as_str(),
        &[
            ("path", &path.display().to_string()),
            ("records", &entries.len().to_string()),
        ],
    );

    Ok(entries)
}

/// Write the full record sequence, deleted records included, to `path`.
///
/// A record that cannot be written is reported before the file is touched.
pub fn save_all(path: &Path, store: &RecordStore) -> Result<(), SaveError> {
    check_writable(store.records())
        .map_err(|e| PersistenceError::save_io("Catalog contains unwritable records", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PersistenceError::save_io(
                format!("Failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    let file = File::create(path).map_err(|e| {
        PersistenceError::save_io(format!("Failed to create catalog file: {}", path.display()), e)
    })?;

    let mut writer = BufWriter::new(file);
    write_records(&mut writer, store.records())
        .and_then(|_| writer.flush())
        .map_err(|e| PersistenceError::save_io("Failed to write catalog records", e))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PersistenceError::save_io("Failed to sync catalog file", e))?;

    Logger::info(
        Event::CatalogSaved.as_str(),
        &[
            ("path", &path.display().to_string()),
            ("records", &store.len().to_string()),
        ],
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Lookup, NewRecord, Status};
    use crate::persistence::PersistenceErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_all(&temp.path().join("absent.txt")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("catalog.txt");

        let mut store = RecordStore::new();
        store
            .insert(NewRecord::new("AAAA1111", "ALPHA", 9.5, "1901", Status::OnDisplay))
            .unwrap();
        store
            .insert(NewRecord::new("BBBB2222", "BETA", 3.0, "", Status::InMaintenance))
            .unwrap();
        store.soft_delete(&Lookup::name("ALPHA")).unwrap();

        save_all(&path, &store).unwrap();
        let entries = load_all(&path).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].deleted);
        assert_eq!(entries[1].record.status, Status::InMaintenance);
        assert_eq!(entries[1].record.year, "");
    }

    #[test]
    fn test_unwritable_record_leaves_file_intact() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.txt");

        let mut store = RecordStore::new();
        store
            .insert(NewRecord::new("AAAA1111", "ALPHA", 9.5, "1901", Status::OnDisplay))
            .unwrap();
        save_all(&path, &store).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        store
            .insert(NewRecord::new("BBBB2222", "BE\nTA", 3.0, "", Status::OnDisplay))
            .unwrap();
        let err = save_all(&path, &store).unwrap_err();

        assert_eq!(err.code(), PersistenceErrorCode::SaveIo);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(load_all(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_directory_path_is_load_io() {
        let temp = TempDir::new().unwrap();
        let err = load_all(temp.path()).unwrap_err();
        // Opening a directory either fails outright or fails on first read.
        assert_ne!(err.code(), PersistenceErrorCode::LoadMalformed);
        assert!(!err.is_not_found());
    }
}
