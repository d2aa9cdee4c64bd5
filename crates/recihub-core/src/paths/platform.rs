//! Platform-specific data directory resolution.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "RECIHUB_DATA_DIR";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `RECIHUB_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/recihub`)
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = resolve_data_root(env::var_os(DATA_DIR_ENV), dirs::data_local_dir())?;

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

pub(super) fn resolve_data_root(
    override_dir: Option<OsString>,
    system_dir: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir {
        if dir.is_empty() {
            return Err(PathError::EmptyOverride(DATA_DIR_ENV));
        }
        return Ok(PathBuf::from(dir));
    }

    system_dir
        .map(|d| d.join("recihub"))
        .ok_or(PathError::NoDataDir)
}
