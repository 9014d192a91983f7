//! # EzDB Storage
//!
//! Persistence primitives for EzDB.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of EzDB.**
//!
//! Users should depend on the main [`ezdb`](https://crates.io/crates/ezdb) crate
//! instead, which provides the stable public API. This crate's API may change
//! without notice between minor versions.
//!
//! ---
//!
//! A database is one file holding one JSON object. Every write replaces the
//! whole file through [`AtomicFileWriter`]:
//!
//! ```text
//! encode → temp file (same dir, final mode) → fsync → rename → fsync dir
//! ```
//!
//! A reader sees either the old file or the new one, never a partial write.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
pub mod codec;

pub use atomic::{AtomicFileWriter, StagedWrite};
pub use codec::{JsonCodec, PersistenceCodec};

/// Default permission bits for newly created database files
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Storage configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    /// Permission bits applied to the file before any byte is written (Unix only).
    ///
    /// `None` keeps the mode of an existing database file and falls back to
    /// [`DEFAULT_FILE_MODE`] for a new one.
    pub file_mode: Option<u32>,
    /// Fsync the parent directory after the rename so the rename itself is durable
    pub sync_directory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file_mode: None,
            sync_directory: true,
        }
    }
}

impl StorageConfig {
    /// Set the permission bits for written files
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = Some(mode);
        self
    }

    /// Permission bits the next write will use
    pub fn effective_file_mode(&self) -> u32 {
        self.file_mode.unwrap_or(DEFAULT_FILE_MODE)
    }

    /// Enable or disable the directory fsync after rename
    pub fn with_sync_directory(mut self, sync: bool) -> Self {
        self.sync_directory = sync;
        self
    }
}
