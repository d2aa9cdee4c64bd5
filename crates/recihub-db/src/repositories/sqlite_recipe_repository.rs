//! `SQLite` implementation of the recipe repository.
//!
//! Inserts and updates of the aggregate run in one transaction each (see
//! [`crate::transaction`]). Fetching the aggregate reads all three tables in
//! one read transaction; single-row operations go straight to the pool.

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use recihub_core::{Recipe, RecipeOrder, RecipeRepository, RecipeRepositoryError};

use super::reconcile::{insert_ingredient, insert_step, reconcile_ingredients, reconcile_steps};
use super::row_mappers::{
    IngredientRow, RECIPE_SELECT_COLUMNS, RecipeRow, StepRow, order_by_clause, require_identity,
};
use crate::transaction::run_in_transaction;

/// `SQLite` implementation of the recipe repository.
pub struct SqliteRecipeRepository {
    pool: SqlitePool,
}

impl SqliteRecipeRepository {
    /// Create a new `SQLite` recipe repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn insert_recipe(&self, recipe: Recipe) -> Result<Recipe, RecipeRepositoryError> {
        let created = run_in_transaction(&self.pool, "insert recipe", move |conn| {
            Box::pin(async move { insert_aggregate(conn, recipe).await })
        })
        .await?;

        info!(
            recipe_id = created.id,
            ingredients = created.ingredients.len(),
            steps = created.steps.len(),
            "Inserted recipe"
        );
        Ok(created)
    }

    async fn select_recipe_by_id(&self, id: i64) -> Result<Recipe, RecipeRepositoryError> {
        // One read transaction so the parent and children come from the same
        // committed state
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RecipeRepositoryError::store("select recipe", e))?;
        let recipe = fetch_aggregate(&mut *tx, id).await?;
        tx.commit()
            .await
            .map_err(|e| RecipeRepositoryError::store("select recipe", e))?;

        Ok(recipe)
    }

    async fn select_recipes_by_owner(
        &self,
        owner: &str,
        order: RecipeOrder,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let sql = format!(
            "SELECT {RECIPE_SELECT_COLUMNS} FROM recipe WHERE username = ? ORDER BY {} LIMIT ? OFFSET ?",
            order_by_clause(order)
        );

        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(owner)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RecipeRepositoryError::store("select recipes", e))?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_recipe(Vec::new(), Vec::new()))
            .collect())
    }

    async fn select_recipe_count_by_owner(
        &self,
        owner: &str,
    ) -> Result<i64, RecipeRepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipe WHERE username = ?")
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RecipeRepositoryError::store("count recipes", e))
    }

    async fn update_recipe(&self, recipe: Recipe) -> Result<Recipe, RecipeRepositoryError> {
        let updated = run_in_transaction(&self.pool, "update recipe", move |conn| {
            Box::pin(async move { update_aggregate(conn, recipe).await })
        })
        .await?;

        info!(
            recipe_id = updated.id,
            ingredients = updated.ingredients.len(),
            steps = updated.steps.len(),
            "Updated recipe"
        );
        Ok(updated)
    }

    async fn update_recipe_image_name(
        &self,
        id: i64,
        image_name: &str,
    ) -> Result<(), RecipeRepositoryError> {
        let result = sqlx::query("UPDATE recipe SET imagename = ? WHERE id = ?")
            .bind(image_name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RecipeRepositoryError::store("update image name", e))?;

        if result.rows_affected() == 0 {
            return Err(RecipeRepositoryError::NotFound(id));
        }

        Ok(())
    }

    async fn delete_recipe(&self, id: i64) -> Result<(), RecipeRepositoryError> {
        // Ingredients and steps are deleted via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM recipe WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RecipeRepositoryError::store("delete recipe", e))?;

        if result.rows_affected() == 0 {
            return Err(RecipeRepositoryError::NotFound(id));
        }

        debug!(recipe_id = id, "Deleted recipe");
        Ok(())
    }
}

/// Read a recipe and its children on an open transaction.
async fn fetch_aggregate(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Recipe, RecipeRepositoryError> {
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        "SELECT {RECIPE_SELECT_COLUMNS} FROM recipe WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| RecipeRepositoryError::store("select recipe", e))?
    .ok_or(RecipeRepositoryError::NotFound(id))?;

    let ingredients = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, name, amount, unit, recipeid FROM ingredient WHERE recipeid = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| RecipeRepositoryError::store("select ingredients", e))?;

    let steps = sqlx::query_as::<_, StepRow>(
        "SELECT stepnumber, description, recipeid FROM step WHERE recipeid = ? ORDER BY stepnumber",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| RecipeRepositoryError::store("select steps", e))?;

    Ok(row.into_recipe(
        ingredients.into_iter().map(Into::into).collect(),
        steps.into_iter().map(Into::into).collect(),
    ))
}

/// Write a new recipe and all of its children on an open transaction.
///
/// The image name is not written; it starts empty and only changes through
/// `update_recipe_image_name`.
async fn insert_aggregate(
    conn: &mut SqliteConnection,
    mut recipe: Recipe,
) -> Result<Recipe, RecipeRepositoryError> {
    const OP: &str = "insert recipe";

    let result = sqlx::query("INSERT INTO recipe (name, username) VALUES (?, ?)")
        .bind(&recipe.name)
        .bind(&recipe.owner)
        .execute(&mut *conn)
        .await
        .map_err(|e| RecipeRepositoryError::store(OP, e))?;

    recipe.id = require_identity(result.last_insert_rowid(), "recipe")?;
    recipe.image_name.clear();

    for ingredient in &mut recipe.ingredients {
        ingredient.id = insert_ingredient(conn, ingredient, recipe.id, OP).await?;
        ingredient.recipe_id = recipe.id;
    }

    for step in &mut recipe.steps {
        insert_step(conn, step, recipe.id, OP).await?;
        step.recipe_id = recipe.id;
    }

    Ok(recipe)
}

/// Replace a stored recipe's scalar fields and children on an open
/// transaction.
async fn update_aggregate(
    conn: &mut SqliteConnection,
    recipe: Recipe,
) -> Result<Recipe, RecipeRepositoryError> {
    let Recipe {
        id,
        name,
        image_name,
        ingredients,
        steps,
        ..
    } = recipe;

    // The owner column is never rewritten; report the stored one
    let owner: String = sqlx::query_scalar(
        "UPDATE recipe SET name = ?, imagename = ? WHERE id = ? RETURNING username",
    )
    .bind(&name)
    .bind(&image_name)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| RecipeRepositoryError::store("update recipe", e))?
    .ok_or(RecipeRepositoryError::NotFound(id))?;

    let ingredients = reconcile_ingredients(conn, id, ingredients).await?;
    let steps = reconcile_steps(conn, id, steps).await?;

    Ok(Recipe {
        id,
        name,
        owner,
        image_name,
        ingredients,
        steps,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
