//! Core domain types, ports and services for recihub.
//!
//! This crate knows nothing about `SQLite`; storage adapters implement
//! [`ports::RecipeRepository`] and are injected into [`RecipeService`].

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Ingredient, Recipe, RecipeOrder, RecipePage, Step};
pub use paths::{PathError, data_root, database_path};
pub use ports::{RecipeRepository, RecipeRepositoryError};
pub use services::{RecipeService, RecipeServiceError};
