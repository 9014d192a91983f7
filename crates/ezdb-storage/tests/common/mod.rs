// Common test utilities for storage integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture that owns a temporary directory holding one database file
pub struct StorageTestFixture {
    #[allow(dead_code)]
    pub temp_dir: TempDir,
    pub db_path: PathBuf,
}

impl StorageTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("store.ezdb");

        Self { temp_dir, db_path }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn list_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir())
            .expect("Failed to read fixture directory")
            .filter_map(|entry| {
                entry
                    .ok()
                    .and_then(|e| e.file_name().to_str().map(String::from))
            })
            .collect();
        names.sort();
        names
    }
}

impl Default for StorageTestFixture {
    fn default() -> Self {
        Self::new()
    }
}
