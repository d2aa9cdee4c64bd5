//! Recipe service - validation and ownership checks in front of the repository.
//!
//! The repository trusts its input. This service is the layer that rejects
//! malformed recipes and refuses to let one owner touch another's recipe.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Recipe, RecipeOrder, RecipePage};
use crate::ports::{RecipeRepository, RecipeRepositoryError};

/// Page size used when the caller asks for a non-positive limit.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Errors returned by [`RecipeService`].
#[derive(Debug, Error)]
pub enum RecipeServiceError {
    #[error("Recipe must have a name")]
    InvalidRecipe,

    #[error("Ingredient must have a name, amount and unit")]
    InvalidIngredient,

    #[error("Unsupported recipe order: {0}")]
    InvalidOrder(String),

    #[error("Recipe not found: {0}")]
    NotFound(i64),

    #[error("Recipe {0} belongs to another user")]
    Forbidden(i64),

    #[error(transparent)]
    Repository(RecipeRepositoryError),
}

impl From<RecipeRepositoryError> for RecipeServiceError {
    fn from(err: RecipeRepositoryError) -> Self {
        match err.root_cause() {
            RecipeRepositoryError::NotFound(id) => Self::NotFound(*id),
            _ => Self::Repository(err),
        }
    }
}

/// Service for managing recipes.
///
/// Thin orchestration over the `RecipeRepository` port.
pub struct RecipeService {
    repo: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    /// Create a new recipe service.
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    /// Create a new recipe with its ingredients and steps.
    pub async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, RecipeServiceError> {
        validate_recipe(&recipe)?;

        let created = self.repo.insert_recipe(recipe).await?;
        info!(
            recipe_id = created.id,
            owner = %created.owner,
            ingredients = created.ingredients.len(),
            steps = created.steps.len(),
            "Created recipe"
        );
        Ok(created)
    }

    /// Get a recipe with all of its children.
    pub async fn get_recipe(&self, id: i64) -> Result<Recipe, RecipeServiceError> {
        Ok(self.repo.select_recipe_by_id(id).await?)
    }

    /// Get one page of an owner's recipes.
    ///
    /// An empty `order` means newest first, a negative offset is clamped to
    /// zero and a non-positive limit becomes [`DEFAULT_PAGE_LIMIT`].
    pub async fn get_recipes_for_owner(
        &self,
        owner: &str,
        order: &str,
        offset: i64,
        limit: i64,
    ) -> Result<RecipePage, RecipeServiceError> {
        let order = if order.trim().is_empty() {
            RecipeOrder::default()
        } else {
            RecipeOrder::parse(order)
                .ok_or_else(|| RecipeServiceError::InvalidOrder(order.to_string()))?
        };
        let offset = offset.max(0);
        let limit = if limit <= 0 { DEFAULT_PAGE_LIMIT } else { limit };

        debug!(owner, %order, offset, limit, "Listing recipes");
        let recipes = self
            .repo
            .select_recipes_by_owner(owner, order, offset, limit)
            .await?;
        let total = self.repo.select_recipe_count_by_owner(owner).await?;

        Ok(RecipePage {
            recipes,
            offset,
            limit,
            total,
        })
    }

    /// Replace a recipe's name and children.
    ///
    /// The caller's `owner` must match the stored owner. The stored image
    /// name is kept; use [`update_image_name`](Self::update_image_name) to
    /// change it.
    pub async fn update_recipe(&self, mut recipe: Recipe) -> Result<Recipe, RecipeServiceError> {
        validate_recipe(&recipe)?;

        let current = self.owned_recipe(recipe.id, &recipe.owner).await?;
        recipe.image_name = current.image_name;

        let updated = self.repo.update_recipe(recipe).await?;
        info!(
            recipe_id = updated.id,
            ingredients = updated.ingredients.len(),
            steps = updated.steps.len(),
            "Updated recipe"
        );
        Ok(updated)
    }

    /// Point a recipe at a new image file name.
    pub async fn update_image_name(
        &self,
        id: i64,
        owner: &str,
        image_name: &str,
    ) -> Result<(), RecipeServiceError> {
        self.owned_recipe(id, owner).await?;
        self.repo.update_recipe_image_name(id, image_name).await?;
        debug!(recipe_id = id, image_name, "Updated recipe image name");
        Ok(())
    }

    /// Delete a recipe owned by `owner`.
    pub async fn remove_recipe(&self, id: i64, owner: &str) -> Result<(), RecipeServiceError> {
        self.owned_recipe(id, owner).await?;
        self.repo.delete_recipe(id).await?;
        info!(recipe_id = id, "Removed recipe");
        Ok(())
    }

    async fn owned_recipe(&self, id: i64, owner: &str) -> Result<Recipe, RecipeServiceError> {
        let current = self.repo.select_recipe_by_id(id).await?;
        if current.owner != owner {
            return Err(RecipeServiceError::Forbidden(id));
        }
        Ok(current)
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<(), RecipeServiceError> {
    if recipe.name.trim().is_empty() {
        return Err(RecipeServiceError::InvalidRecipe);
    }

    let incomplete = recipe.ingredients.iter().any(|i| {
        i.name.trim().is_empty() || i.amount.trim().is_empty() || i.unit.trim().is_empty()
    });
    if incomplete {
        return Err(RecipeServiceError::InvalidIngredient);
    }

    Ok(())
}
