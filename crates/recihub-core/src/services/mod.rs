//! Core services - the application's business logic layer.
//!
//! Services here are pure orchestrators over ports; they don't know about
//! concrete implementations.

mod recipe_service;

pub use recipe_service::{DEFAULT_PAGE_LIMIT, RecipeService, RecipeServiceError};
