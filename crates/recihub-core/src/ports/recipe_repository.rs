//! Recipe repository trait and error types.
//!
//! This module defines the repository abstraction for persisting the recipe
//! aggregate (a recipe plus its ingredient and step rows).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Recipe, RecipeOrder};

/// Domain-specific errors for recipe repository operations.
///
/// Callers should branch on the variant (after [`root_cause`](Self::root_cause))
/// rather than on message text.
#[derive(Debug, Error)]
pub enum RecipeRepositoryError {
    /// No recipe row exists for the given id.
    #[error("Recipe not found: {0}")]
    NotFound(i64),

    /// The store accepted an insert but produced no usable identity.
    #[error("Store generated no identity for new {0}")]
    NoIdentityGenerated(&'static str),

    /// A statement failed; `operation` names the step of the unit of work.
    #[error("Storage error during {operation}: {message}")]
    Store {
        operation: &'static str,
        message: String,
    },

    /// The store could not open a transaction.
    #[error("Failed to begin transaction: {0}")]
    TransactionStart(String),

    /// The work inside a transaction failed and was rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(#[source] Box<RecipeRepositoryError>),

    /// The work succeeded but the commit did not.
    #[error("Failed to commit transaction: {0}")]
    Commit(String),
}

impl RecipeRepositoryError {
    /// Build a `Store` error from any displayable backend failure.
    pub fn store(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Store {
            operation,
            message: err.to_string(),
        }
    }

    /// The innermost error, looking through `TransactionFailed` wrappers.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::TransactionFailed(inner) => inner.root_cause(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound(_))
    }
}

/// Repository trait for the recipe aggregate.
///
/// # Design Rules
///
/// - Ingredients and steps are embedded in `Recipe`; there is no separate
///   child API.
/// - `insert_recipe()` and `update_recipe()` run in one transaction each:
///   either the whole aggregate is written or nothing is.
/// - `update_recipe()` takes the full desired child collections, not deltas.
/// - Child rows are removed by the store's cascade when a recipe is deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe with its ingredients and steps.
    ///
    /// Returns the recipe with store-assigned ids on the recipe and on every
    /// ingredient.
    ///
    /// # Errors
    ///
    /// - `TransactionFailed` wrapping `Store` or `NoIdentityGenerated` when
    ///   any row could not be written
    /// - `TransactionStart` / `Commit` for failures of the transaction itself
    async fn insert_recipe(&self, recipe: Recipe) -> Result<Recipe, RecipeRepositoryError>;

    /// Get a recipe and all of its children by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no recipe with the given id exists
    /// - `Store` for storage errors
    async fn select_recipe_by_id(&self, id: i64) -> Result<Recipe, RecipeRepositoryError>;

    /// List one page of an owner's recipes. Children are not loaded.
    async fn select_recipes_by_owner(
        &self,
        owner: &str,
        order: RecipeOrder,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Count an owner's recipes.
    async fn select_recipe_count_by_owner(&self, owner: &str)
    -> Result<i64, RecipeRepositoryError>;

    /// Replace a recipe's name, image name and children.
    ///
    /// Ingredients with a non-zero id are updated in place, ingredients with
    /// id `0` are inserted, and stored ingredients missing from the input are
    /// deleted. Steps are upserted by step number and stale numbers deleted.
    ///
    /// # Errors
    ///
    /// - `TransactionFailed` wrapping `NotFound` if the recipe does not exist
    /// - `TransactionFailed` wrapping `Store` if an ingredient id does not
    ///   belong to this recipe or a statement fails
    async fn update_recipe(&self, recipe: Recipe) -> Result<Recipe, RecipeRepositoryError>;

    /// Update only the image name column.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no recipe with the given id exists
    async fn update_recipe_image_name(
        &self,
        id: i64,
        image_name: &str,
    ) -> Result<(), RecipeRepositoryError>;

    /// Delete a recipe; its children are removed by cascade.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no recipe with the given id exists
    async fn delete_recipe(&self, id: i64) -> Result<(), RecipeRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_transaction_failures() {
        let err = RecipeRepositoryError::TransactionFailed(Box::new(
            RecipeRepositoryError::TransactionFailed(Box::new(RecipeRepositoryError::NotFound(4))),
        ));

        assert!(matches!(err.root_cause(), RecipeRepositoryError::NotFound(4)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_error_carries_operation() {
        let err = RecipeRepositoryError::store("step reconciliation", "disk I/O error");
        assert_eq!(
            err.to_string(),
            "Storage error during step reconciliation: disk I/O error"
        );
        assert!(!err.is_not_found());
    }
}
