//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits are minimal and aggregate-focused for repositories

pub mod recipe_repository;

pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};

#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
