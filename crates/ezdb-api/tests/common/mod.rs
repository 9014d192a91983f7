// Common test utilities for database integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture that creates a temporary directory for database files
pub struct DbTestFixture {
    #[allow(dead_code)]
    pub temp_dir: TempDir,
}

impl DbTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Path of a database file inside the fixture directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write raw contents to a file inside the fixture directory
    #[allow(dead_code)]
    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    #[allow(dead_code)]
    pub fn read_raw(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("Failed to read fixture file")
    }

    #[allow(dead_code)]
    pub fn list_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.temp_dir.path())
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

impl Default for DbTestFixture {
    fn default() -> Self {
        Self::new()
    }
}
