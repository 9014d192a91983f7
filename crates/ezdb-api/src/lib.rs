//! # EzDB
//!
//! An embedded, single-file key-value store. A database is an ordered map of
//! string keys to string values, held in memory and persisted as one JSON
//! object in a `.ezdb` file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ezdb::{Database, SortOrder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Opens the file, or creates it if missing
//!     let mut db = Database::open("./settings.ezdb")?;
//!
//!     db.set("user:1:name", "Alice")?;
//!     db.set("user:1:email", "alice@example.com")?;
//!
//!     if let Some(name) = db.get("user:1:name")? {
//!         println!("Name: {}", name);
//!     }
//!
//!     for (key, value) in db.prefix("user:1:")? {
//!         println!("{} = {}", key, value);
//!     }
//!
//!     db.sort(SortOrder::KeyDesc)?;
//!     db.save()?; // persist and keep working
//!     db.close()?; // persist and freeze the handle
//!     Ok(())
//! }
//! ```
//!
//! ## Durability
//!
//! Mutations only touch memory. [`Database::save`] and [`Database::close`]
//! encode the whole map and replace the file atomically (temp file, fsync,
//! rename), so a crash never leaves a partially written database behind.
//!
//! ## Concurrency
//!
//! A handle assumes exclusive access. Two handles on the same path are not
//! coordinated: the last `save`/`close` to finish wins.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logging;
pub mod security;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// Re-export core types
pub use ezdb_core::{Entry, Error, OrderedIndexedMap, Result, SortOrder};

// Storage components
pub use ezdb_storage::{
    AtomicFileWriter, JsonCodec, PersistenceCodec, StagedWrite, StorageConfig,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle lifecycle state. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Closed,
}

/// The main database handle.
///
/// Owns one in-memory [`OrderedIndexedMap`] and the path it persists to.
/// Every operation fails with [`Error::Closed`] (E17005) once the handle has
/// been closed.
///
/// # Examples
///
/// ```rust,no_run
/// use ezdb::Database;
///
/// let mut db = Database::open("./cache.ezdb")?;
/// db.set("greeting", "hello")?;
/// db.close()?;
///
/// let db = Database::open("./cache.ezdb")?;
/// assert_eq!(db.get("greeting")?, Some("hello".to_string()));
/// # Ok::<(), ezdb::Error>(())
/// ```
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    store: OrderedIndexedMap,
    state: State,
    writer: AtomicFileWriter,
}

impl Database {
    /// Opens the database at `path`, creating the file if it does not exist.
    ///
    /// Loaded entries are sorted by key so iteration order does not depend
    /// on the key order inside the file.
    ///
    /// # Errors
    ///
    /// - E17001 if the path is empty or does not end in `.ezdb`
    /// - E17002 if the path is a directory
    /// - E17003 if a missing file cannot be created
    /// - E17004 if the file is not a JSON object of strings
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use ezdb::Database;
    ///
    /// let db = Database::open("./data.ezdb")?;
    /// println!("{} entries", db.count()?);
    /// # Ok::<(), ezdb::Error>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, StorageConfig::default())
    }

    /// Opens the database with a custom storage configuration.
    ///
    /// The configuration applies to the initial file creation and to every
    /// later `save`/`close`. Without an explicit `file_mode`, an existing
    /// file keeps its current permission bits across saves.
    pub fn open_with_config<P: AsRef<Path>>(path: P, mut config: StorageConfig) -> Result<Self> {
        let path = path.as_ref();
        security::validate_path(path)?;

        if path.is_dir() {
            return Err(Error::IsDirectory(path.to_path_buf()));
        }

        if config.file_mode.is_none() {
            config.file_mode = existing_file_mode(path);
        }

        let writer = AtomicFileWriter::new(config);

        let store = match fs::read(path) {
            Ok(bytes) => {
                let mut store = JsonCodec.decode(&bytes)?;
                store.sort(SortOrder::KeyAsc);
                store
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let placeholder = JsonCodec.encode(&OrderedIndexedMap::new())?;
                writer.write(path, &placeholder).map_err(|e| {
                    warn!(path = %path.display(), error = %e, "Failed to create database file");
                    Error::WriteFailed(e.to_string())
                })?;
                debug!(path = %path.display(), "Created database file");
                OrderedIndexedMap::new()
            }
            Err(err) => return Err(Error::Io(err)),
        };

        info!(path = %path.display(), entries = store.len(), "Opened database");

        Ok(Database {
            path: path.to_path_buf(),
            store,
            state: State::Open,
            writer,
        })
    }

    /// Returns true if a file with the `.ezdb` extension exists at `path`.
    ///
    /// The file is not opened or validated. A path with any other extension
    /// reports `false`.
    pub fn exists<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        security::has_db_extension(path) && path.exists()
    }

    /// Persists the store to disk and closes the handle.
    ///
    /// If the write fails the handle stays open and the store is unchanged,
    /// so the call can be retried.
    pub fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.persist()?;
        self.state = State::Closed;
        info!(path = %self.path.display(), entries = self.store.len(), "Closed database");
        Ok(())
    }

    /// Persists the store to disk. The handle stays open.
    pub fn save(&self) -> Result<()> {
        self.ensure_open()?;
        self.persist()
    }

    /// Inserts or updates a key-value pair.
    ///
    /// A new key is appended to the iteration order; an existing key keeps
    /// its position.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use ezdb::Database;
    ///
    /// let mut db = Database::open("./data.ezdb")?;
    /// db.set("name", "Alice")?;
    /// db.set("name", "Bob")?; // Updates the value in place
    /// # Ok::<(), ezdb::Error>(())
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.store.set(key, value);
        Ok(())
    }

    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_open()?;
        Ok(self.store.get(key).map(str::to_string))
    }

    /// Deletes a key-value pair.
    ///
    /// Returns `true` if the key existed and was deleted, `false` otherwise.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.store.delete(key))
    }

    /// Returns true if `key` is present.
    pub fn has(&self, key: &str) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.store.contains_key(key))
    }

    /// Number of entries.
    pub fn count(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.store.len())
    }

    /// Removes every entry from memory. The file is not touched until the
    /// next `save` or `close`.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.store = OrderedIndexedMap::new();
        debug!(path = %self.path.display(), "Cleared database");
        Ok(())
    }

    /// All keys in iteration order.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.ensure_open()?;
        Ok(self.store.keys())
    }

    /// All values in iteration order.
    pub fn values(&self) -> Result<Vec<String>> {
        self.ensure_open()?;
        Ok(self.store.values())
    }

    /// All entries in iteration order.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        self.ensure_open()?;
        Ok(self.store.entries())
    }

    /// Entries whose key starts with `prefix`, in iteration order.
    pub fn prefix(&self, prefix: &str) -> Result<Vec<Entry>> {
        self.ensure_open()?;
        Ok(self.store.entries_with_prefix(prefix))
    }

    /// Renames `old` to `new`, keeping its value.
    ///
    /// Returns `false` without changing anything if `old` is absent. The
    /// renamed entry moves to the end of the iteration order. Renaming onto
    /// an existing key overwrites that key's value in place.
    pub fn update_key_name(&mut self, old: &str, new: impl Into<String>) -> Result<bool> {
        self.ensure_open()?;
        let new = new.into();
        let renamed = self.store.rename_key(old, new.as_str());
        if renamed {
            debug!(path = %self.path.display(), old, new = %new, "Renamed key");
        }
        Ok(renamed)
    }

    /// Reorders the entries.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use ezdb::{Database, SortOrder};
    ///
    /// let mut db = Database::open("./scores.ezdb")?;
    /// db.set("10", "ten")?;
    /// db.set("2", "two")?;
    /// db.sort(SortOrder::NumericAsc)?;
    /// assert_eq!(db.keys()?, vec!["2", "10"]);
    /// # Ok::<(), ezdb::Error>(())
    /// ```
    pub fn sort(&mut self, order: SortOrder) -> Result<()> {
        self.ensure_open()?;
        self.store.sort(order);
        debug!(path = %self.path.display(), %order, "Sorted database");
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Storage configuration used for writes.
    pub fn config(&self) -> &StorageConfig {
        self.writer.config()
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            State::Open => Ok(()),
            State::Closed => Err(Error::Closed),
        }
    }

    /// Encode the store and atomically replace the file. The store is only read.
    fn persist(&self) -> Result<()> {
        let bytes = JsonCodec
            .encode(&self.store)
            .map_err(|e| Error::WriteFailed(e.to_string()))?;

        if let Err(err) = self.writer.write(&self.path, &bytes) {
            warn!(path = %self.path.display(), error = %err, "Failed to persist database");
            return Err(Error::WriteFailed(err.to_string()));
        }

        debug!(
            path = %self.path.display(),
            entries = self.store.len(),
            bytes = bytes.len(),
            "Persisted database"
        );
        Ok(())
    }
}

/// Permission bits of the file at `path`, if it exists.
#[cfg(unix)]
fn existing_file_mode(path: &Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .ok()
        .map(|meta| meta.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn existing_file_mode(_path: &Path) -> Option<u32> {
    None
}
