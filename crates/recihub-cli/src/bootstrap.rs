//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: the database pool (via recihub-db) and the recipe
//! service (via recihub-core). Command handlers receive the composed
//! context and delegate work to it.

use std::path::PathBuf;

use anyhow::Result;
use recihub_core::RecipeService;
use recihub_core::paths::database_path;
use recihub_db::{RecipeFactory, setup_database};
use tracing::debug;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
}

impl CliConfig {
    /// Create config with the default database location.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            db_path: database_path()?,
        })
    }

    /// Create config from the `--db` flag, falling back to the defaults.
    pub fn from_db_flag(db: Option<PathBuf>) -> Result<Self> {
        match db {
            Some(db_path) => Ok(Self { db_path }),
            None => Self::with_defaults(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    recipes: RecipeService,
    db_path: PathBuf,
}

impl CliContext {
    /// Access the recipe service.
    pub const fn recipes(&self) -> &RecipeService {
        &self.recipes
    }

    /// Access the database path in use.
    pub const fn db_path(&self) -> &PathBuf {
        &self.db_path
    }
}

/// Bootstrap the CLI application.
///
/// Opens (and if needed creates) the database, applies the schema and
/// builds the recipe service on top of it.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    debug!(path = %config.db_path.display(), "Opening recipe database");
    let pool = setup_database(&config.db_path).await?;

    Ok(CliContext {
        recipes: RecipeFactory::build_service(pool),
        db_path: config.db_path,
    })
}
