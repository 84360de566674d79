use super::{processed_key, LocalObjectStore, MemoryObjectStore, ObjectLocation, Storage, StorageError, StoredObject};
use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn create_object(body: &str) -> StoredObject {
    StoredObject {
        body: body.as_bytes().to_vec(),
        content_type: "application/json".to_string(),
        metadata: BTreeMap::from([("record_count".to_string(), "1".to_string())])
    }
}

#[test]
fn test_processed_key_mirrors_the_raw_partition() {
    assert_eq!(
        processed_key("raw-data/year=2024/month=07/day=26/transactions-20240726.csv").as_deref(),
        Some("processed-data/year=2024/month=07/day=26/transactions-20240726.json")
    );
    assert_eq!(processed_key("raw-data/upload.CSV").as_deref(), Some("processed-data/upload.json"));
    assert_eq!(processed_key("raw-data/notes.txt").as_deref(), Some("processed-data/notes.txt.json"));
}

#[test]
fn test_processed_key_ignores_keys_outside_raw_data() {
    assert_eq!(processed_key("processed-data/file.json"), None);
    assert_eq!(processed_key("other/raw-data/file.csv"), None);
    assert_eq!(processed_key("raw-data/"), None);
    assert_eq!(processed_key("raw-data/year=2024/"), None);
}

#[test]
fn test_local_store_round_trips_objects() -> Result<()> {
    let root = TempDir::new()?;
    let store = LocalObjectStore::new(root.path());
    let location = ObjectLocation::new("bucket", "processed-data/day=26/file.json");

    store.put(&location, create_object("{}"))?;

    assert_eq!(store.get(&location)?, b"{}".to_vec());
    assert!(root.path().join("bucket/processed-data/day=26/file.json").is_file());

    Ok(())
}

#[test]
fn test_local_store_overwrites_without_leaving_temp_files() -> Result<()> {
    let root = TempDir::new()?;
    let store = LocalObjectStore::new(root.path());
    let location = ObjectLocation::new("bucket", "out/file.json");

    store.put(&location, create_object("first"))?;
    store.put(&location, create_object("second"))?;

    assert_eq!(store.get(&location)?, b"second".to_vec());
    assert_eq!(fs::read_dir(root.path().join("bucket/out"))?.count(), 1);

    Ok(())
}

#[test]
fn test_local_store_reports_missing_objects() -> Result<()> {
    let root = TempDir::new()?;
    let store = LocalObjectStore::new(root.path());
    let result = store.get(&ObjectLocation::new("bucket", "raw-data/missing.csv"));

    assert!(matches!(result, Err(StorageError::NotFound { .. })));

    Ok(())
}

#[test]
fn test_local_store_rejects_escaping_keys() -> Result<()> {
    let root = TempDir::new()?;
    let store = LocalObjectStore::new(root.path());

    for location in [
        ObjectLocation::new("bucket", "../outside.csv"),
        ObjectLocation::new("bucket", "/etc/passwd"),
        ObjectLocation::new("..", "file.csv"),
        ObjectLocation::new("bucket", ""),
    ] {
        assert!(matches!(store.get(&location), Err(StorageError::InvalidKey(_))));
    }

    Ok(())
}

#[test]
fn test_memory_store_basic_get_and_put_operations() -> Result<()> {
    let store = MemoryObjectStore::new();
    let location = ObjectLocation::new("bucket", "raw-data/file.csv");

    assert!(matches!(store.get(&location), Err(StorageError::NotFound { .. })));

    store.insert(location.clone(), "a,b\n");
    assert_eq!(store.get(&location)?, b"a,b\n".to_vec());

    store.put(&location, create_object("replaced"))?;
    assert_eq!(store.object(&location).map(|object| object.content_type), Some("application/json".to_string()));
    assert_eq!(store.len(), 1);

    Ok(())
}
