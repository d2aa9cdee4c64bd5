//! Database path resolution.
//!
//! Provides the canonical path to the recihub `SQLite` database file.

use std::env;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Environment variable pointing directly at the database file.
pub const DB_PATH_ENV: &str = "RECIHUB_DB_PATH";

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "recihub.db";

/// Get the path to the recihub database file.
///
/// `RECIHUB_DB_PATH` takes precedence; otherwise the file lives in
/// [`data_root`].
pub fn database_path() -> Result<PathBuf, PathError> {
    match env::var_os(DB_PATH_ENV) {
        Some(path) if path.is_empty() => Err(PathError::EmptyOverride(DB_PATH_ENV)),
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(data_root()?.join(DATABASE_FILE_NAME)),
    }
}
