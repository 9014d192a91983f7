// Crash-safety tests for atomic database file replacement

mod common;

use common::StorageTestFixture;
use ezdb_core::OrderedIndexedMap;
use ezdb_storage::{AtomicFileWriter, JsonCodec, PersistenceCodec, StorageConfig};
use std::fs;

fn sample_map(n: usize) -> OrderedIndexedMap {
    (0..n)
        .map(|i| (format!("key{}", i), format!("value{}", i)))
        .collect()
}

#[test]
fn test_crash_before_rename_keeps_original_bytes() {
    let fixture = StorageTestFixture::new();
    let writer = AtomicFileWriter::default();

    let original = JsonCodec.encode(&sample_map(3)).expect("Failed to encode");
    writer
        .write(&fixture.db_path, &original)
        .expect("Failed to write original");

    // Temp file fully written and synced, then the process "dies" before
    // the rename: the staged write is dropped without commit.
    let replacement = JsonCodec.encode(&sample_map(500)).expect("Failed to encode");
    let staged = writer
        .stage(&fixture.db_path, &replacement)
        .expect("Failed to stage");
    drop(staged);

    assert_eq!(fs::read(&fixture.db_path).unwrap(), original);
    assert_eq!(fixture.list_files(), vec!["store.ezdb"]);
}

#[test]
fn test_commit_leaves_complete_document() {
    let fixture = StorageTestFixture::new();
    let writer = AtomicFileWriter::new(StorageConfig::default().with_sync_directory(false));

    writer
        .write(&fixture.db_path, b"{\"stale\":\"1\"}")
        .expect("Failed to write");

    let map = sample_map(1000);
    let bytes = JsonCodec.encode(&map).expect("Failed to encode");
    writer.write(&fixture.db_path, &bytes).expect("Failed to write");

    let on_disk = fs::read(&fixture.db_path).unwrap();
    assert_eq!(on_disk.len(), bytes.len());

    let decoded = JsonCodec.decode(&on_disk).expect("Document must decode");
    assert_eq!(decoded.len(), 1000);
    assert!(!decoded.contains_key("stale"));
    assert_eq!(decoded.get("key999"), Some("value999"));
}

#[test]
fn test_repeated_writes_leave_no_temp_files() {
    let fixture = StorageTestFixture::new();
    let writer = AtomicFileWriter::default();

    for i in 0..20 {
        let bytes = JsonCodec.encode(&sample_map(i)).expect("Failed to encode");
        writer.write(&fixture.db_path, &bytes).expect("Failed to write");
    }

    assert_eq!(fixture.list_files(), vec!["store.ezdb"]);
    let decoded = JsonCodec
        .decode(&fs::read(&fixture.db_path).unwrap())
        .expect("Failed to decode");
    assert_eq!(decoded.len(), 19);
}

#[test]
fn test_interleaved_stages_last_commit_wins() {
    let fixture = StorageTestFixture::new();
    let writer = AtomicFileWriter::default();

    let first = writer.stage(&fixture.db_path, b"{\"v\":\"first\"}").unwrap();
    let second = writer.stage(&fixture.db_path, b"{\"v\":\"second\"}").unwrap();
    assert_ne!(first.temp_path(), second.temp_path());

    second.commit().unwrap();
    first.commit().unwrap();

    assert_eq!(fs::read(&fixture.db_path).unwrap(), b"{\"v\":\"first\"}");
    assert_eq!(fixture.list_files(), vec!["store.ezdb"]);
}
