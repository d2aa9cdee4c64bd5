//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for another transaction's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// This function:
/// 1. Creates the parent directory and the database file if missing
/// 2. Enables foreign keys on every pooled connection (cascading deletes
///    of ingredients and steps depend on it)
/// 3. Creates all tables and indexes
///
/// # Example
///
/// ```rust,no_run
/// use recihub_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/path/to/recihub.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT),
    )
    .await?;

    create_schema(&pool).await?;

    tracing::debug!(path = %db_path.display(), "Database ready");
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:")?
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    let pool = SqlitePool::connect_with(options).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// It is safe to call multiple times as all operations use IF NOT EXISTS.
pub(crate) async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            username TEXT NOT NULL,
            imagename TEXT DEFAULT '',
            CHECK (name <> '' AND username <> '')
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Owner listings filter on username
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipe_username ON recipe(username)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingredient (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            amount TEXT NOT NULL,
            unit TEXT NOT NULL,
            recipeid INTEGER NOT NULL,
            FOREIGN KEY (recipeid) REFERENCES recipe(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredient_recipe ON ingredient(recipeid)")
        .execute(pool)
        .await?;

    // Steps are keyed by (stepnumber, recipeid); no surrogate id
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS step (
            stepnumber INTEGER NOT NULL,
            description TEXT NOT NULL,
            recipeid INTEGER NOT NULL,
            PRIMARY KEY (stepnumber, recipeid),
            FOREIGN KEY (recipeid) REFERENCES recipe(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_step_recipe ON step(recipeid)")
        .execute(pool)
        .await?;

    Ok(())
}
