//! Path utilities for the recihub data directory and database file.
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Environment overrides are read here and nowhere else

mod database;
mod error;
mod platform;

pub use database::{DATABASE_FILE_NAME, DB_PATH_ENV, database_path};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
