//! Path validation for database files
//!
//! Every database lives in exactly one file whose name ends in `.ezdb`.
//! These checks run before any filesystem access.

use ezdb_core::error::{Error, Result};
use std::path::Path;

/// Required database file extension (without the dot)
pub const DB_EXTENSION: &str = "ezdb";

/// Upper bound on accepted path length in bytes
const MAX_PATH_LENGTH: usize = 4096;

/// Validates a database path
///
/// # Errors
///
/// Returns `Error::InvalidPath` (E17001) if the path is empty, too long,
/// contains a null byte, or does not end in `.ezdb`.
///
/// The extension is read with [`Path::extension`], so the file needs a stem:
/// a bare dotfile named `.ezdb` (or `dir/.ezdb`) has no extension and is
/// rejected.
#[inline]
pub fn validate_path(path: &Path) -> Result<()> {
    let raw = path.as_os_str();

    if raw.is_empty() {
        return Err(Error::InvalidPath("path cannot be empty".to_string()));
    }

    if raw.len() > MAX_PATH_LENGTH {
        return Err(Error::InvalidPath(format!(
            "path length {} exceeds maximum {}",
            raw.len(),
            MAX_PATH_LENGTH
        )));
    }

    if raw.to_string_lossy().contains('\0') {
        return Err(Error::InvalidPath(
            "path cannot contain null bytes".to_string(),
        ));
    }

    if !has_db_extension(path) {
        return Err(Error::InvalidPath(format!(
            "{} does not have the .{} extension",
            path.display(),
            DB_EXTENSION
        )));
    }

    Ok(())
}

/// Returns true if the path ends in `.ezdb`
#[inline]
pub fn has_db_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(DB_EXTENSION)
}
