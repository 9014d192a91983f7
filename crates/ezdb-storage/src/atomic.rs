//! Atomic whole-file replacement.
//!
//! Bytes are written to a temporary file in the destination's directory
//! (same filesystem, so the rename is atomic), synced, and renamed over the
//! destination. The temporary file is created with its final permission bits
//! and is removed on every exit path that does not end in a rename.

use crate::StorageConfig;
use ezdb_core::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Writes files so that readers observe either the old or the new contents.
#[derive(Debug, Clone, Default)]
pub struct AtomicFileWriter {
    config: StorageConfig,
}

impl AtomicFileWriter {
    /// Create a writer with the given configuration
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// The writer's configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Atomically replace `path` with `bytes`.
    pub fn write(&self, path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
        self.stage(path, bytes)?.commit()
    }

    /// Write and sync `bytes` to a temporary file next to `path`.
    ///
    /// Nothing is visible at `path` until [`StagedWrite::commit`] is called.
    /// Dropping the returned value discards the temporary file.
    pub fn stage(&self, path: impl AsRef<Path>, bytes: &[u8]) -> Result<StagedWrite> {
        let target = path.as_ref().to_path_buf();
        let file_name = target
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::InvalidPath(format!("no file name in {}", target.display()))
            })?;
        let dir = parent_dir(&target);

        let prefix = format!(".{}.", file_name);
        let mut temp = self.temp_builder(&prefix).tempfile_in(dir)?;

        if let Err(err) = write_synced(&mut temp, bytes) {
            warn!(path = %target.display(), error = %err, "Failed to write temp file");
            discard(temp);
            return Err(Error::Io(err));
        }

        debug!(
            path = %target.display(),
            temp = %temp.path().display(),
            bytes = bytes.len(),
            "Staged atomic write"
        );

        Ok(StagedWrite {
            temp,
            target,
            sync_directory: self.config.sync_directory,
        })
    }

    #[cfg(unix)]
    fn temp_builder<'a>(&self, prefix: &'a str) -> tempfile::Builder<'a, 'static> {
        use std::os::unix::fs::PermissionsExt;

        let mut builder = tempfile::Builder::new();
        builder
            .prefix(prefix)
            .suffix(".tmp")
            .permissions(std::fs::Permissions::from_mode(self.config.effective_file_mode()));
        builder
    }

    #[cfg(not(unix))]
    fn temp_builder<'a>(&self, prefix: &'a str) -> tempfile::Builder<'a, 'static> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix).suffix(".tmp");
        builder
    }
}

/// A fully written temporary file waiting to be renamed into place.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
    sync_directory: bool,
}

impl StagedWrite {
    /// Path of the temporary file
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Destination path
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the temporary file over the destination.
    ///
    /// If the rename fails the temporary file is removed and the destination
    /// is left untouched.
    pub fn commit(self) -> Result<()> {
        let StagedWrite {
            temp,
            target,
            sync_directory,
        } = self;

        if let Err(err) = temp.persist(&target) {
            warn!(path = %target.display(), error = %err.error, "Atomic rename failed");
            discard(err.file);
            return Err(Error::Io(err.error));
        }

        if sync_directory {
            sync_dir(parent_dir(&target))?;
        }

        debug!(path = %target.display(), "Committed atomic write");
        Ok(())
    }
}

fn write_synced(temp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()
}

/// Remove a temporary file that will never be renamed into place.
fn discard(temp: NamedTempFile) {
    let temp_path = temp.path().to_path_buf();
    if let Err(err) = temp.close() {
        warn!(temp = %temp_path.display(), error = %err, "Failed to remove temp file");
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Fsync a directory so a rename inside it survives power loss.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    std::fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    // NTFS journals directory metadata; there is no directory fsync.
    Ok(())
}
