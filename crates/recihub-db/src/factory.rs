//! Composition utilities for wiring recihub with `SQLite` backends.
//!
//! This module provides factory functions for building repositories and
//! services. It is focused purely on construction and should not contain
//! any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use recihub_core::{RecipeRepository, RecipeService};

use crate::repositories::SqliteRecipeRepository;

/// Factory for creating repository instances with `SQLite` backends.
pub struct RecipeFactory;

impl RecipeFactory {
    /// Create a recipe repository from a pool.
    pub fn recipe_repository(pool: SqlitePool) -> Arc<SqliteRecipeRepository> {
        Arc::new(SqliteRecipeRepository::new(pool))
    }

    /// Build a `RecipeService` backed by `SQLite`.
    ///
    /// This is the recommended single-step way for adapters to obtain the
    /// service. Equivalent to:
    ///
    /// ```ignore
    /// let repo: Arc<dyn RecipeRepository> = RecipeFactory::recipe_repository(pool);
    /// let service = RecipeService::new(repo);
    /// ```
    pub fn build_service(pool: SqlitePool) -> RecipeService {
        let repo: Arc<dyn RecipeRepository> = Self::recipe_repository(pool);
        RecipeService::new(repo)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a recipe repository using this test database.
    pub fn recipe_repository(&self) -> SqliteRecipeRepository {
        SqliteRecipeRepository::new(self.pool.clone())
    }

    /// Create a recipe service using this test database.
    pub fn recipe_service(&self) -> RecipeService {
        RecipeFactory::build_service(self.pool.clone())
    }

    /// Make every ingredient insert named `name` fail inside the store.
    ///
    /// Used to exercise rollback of partially written aggregates.
    pub async fn fail_ingredient_inserts_named(&self, name: &str) -> anyhow::Result<()> {
        // Triggers cannot take bind parameters; quote the literal instead
        let literal = name.replace('\'', "''");
        sqlx::query(&format!(
            "CREATE TRIGGER IF NOT EXISTS reject_ingredient_insert \
             BEFORE INSERT ON ingredient WHEN NEW.name = '{literal}' \
             BEGIN SELECT RAISE(ABORT, 'ingredient insert rejected'); END"
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
