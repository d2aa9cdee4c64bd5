//! `SQLite` adapter for recihub.
//!
//! Implements [`recihub_core::RecipeRepository`] on top of `sqlx`, including
//! the transaction runner that keeps recipe aggregate writes atomic.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;
pub mod transaction;

// Re-export factory for convenient access
pub use factory::RecipeFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::SqliteRecipeRepository;

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
pub use transaction::{TxFuture, run_in_transaction};
