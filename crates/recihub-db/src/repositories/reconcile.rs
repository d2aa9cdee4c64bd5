//! Child-row reconciliation for recipe updates.
//!
//! Both functions take the full desired child collection and issue the
//! deletes, updates and inserts that turn the stored rows into exactly that
//! collection. They run on an open transaction and never commit.
//!
//! Every statement is scoped by `recipeid`, so an ingredient id supplied by
//! the caller can never reach a row owned by another recipe.

use std::collections::BTreeMap;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::debug;

use recihub_core::{Ingredient, RecipeRepositoryError, Step};

use super::row_mappers::require_identity;

const INGREDIENT_OP: &str = "ingredient reconciliation";
const STEP_OP: &str = "step reconciliation";

/// Insert one ingredient row and return its generated id.
pub(super) async fn insert_ingredient(
    conn: &mut SqliteConnection,
    ingredient: &Ingredient,
    recipe_id: i64,
    operation: &'static str,
) -> Result<i64, RecipeRepositoryError> {
    let result =
        sqlx::query("INSERT INTO ingredient (name, amount, unit, recipeid) VALUES (?, ?, ?, ?)")
            .bind(&ingredient.name)
            .bind(&ingredient.amount)
            .bind(&ingredient.unit)
            .bind(recipe_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| RecipeRepositoryError::store(operation, e))?;

    require_identity(result.last_insert_rowid(), "ingredient")
}

/// Insert one step row under its caller-assigned number.
pub(super) async fn insert_step(
    conn: &mut SqliteConnection,
    step: &Step,
    recipe_id: i64,
    operation: &'static str,
) -> Result<(), RecipeRepositoryError> {
    sqlx::query("INSERT INTO step (stepnumber, description, recipeid) VALUES (?, ?, ?)")
        .bind(step.step_number)
        .bind(&step.description)
        .bind(recipe_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| RecipeRepositoryError::store(operation, e))?;

    Ok(())
}

/// Make the recipe's ingredient rows match `desired`.
///
/// Entries with a non-zero id are kept and updated in place; entries with id
/// `0` are inserted; stored rows whose id is not among the kept ids are
/// deleted. Returns the kept entries in id order followed by the inserted
/// ones; a repeated id appears once, with its last supplied values.
pub(super) async fn reconcile_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    desired: Vec<Ingredient>,
) -> Result<Vec<Ingredient>, RecipeRepositoryError> {
    let (existing, new): (Vec<Ingredient>, Vec<Ingredient>) =
        desired.into_iter().partition(Ingredient::is_persisted);

    // A repeated id keeps its last entry, as the updates do in the table
    let existing: BTreeMap<i64, Ingredient> = existing.into_iter().map(|i| (i.id, i)).collect();

    let deleted = if existing.is_empty() {
        sqlx::query("DELETE FROM ingredient WHERE recipeid = ?")
            .bind(recipe_id)
            .execute(&mut *conn)
            .await
    } else {
        let mut delete = QueryBuilder::<Sqlite>::new("DELETE FROM ingredient WHERE recipeid = ");
        delete.push_bind(recipe_id).push(" AND id NOT IN (");
        let mut ids = delete.separated(", ");
        for id in existing.keys() {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
        delete.build().execute(&mut *conn).await
    }
    .map_err(|e| RecipeRepositoryError::store(INGREDIENT_OP, e))?;

    let mut reconciled = Vec::with_capacity(existing.len() + new.len());

    for mut ingredient in existing.into_values() {
        let updated = sqlx::query(
            "UPDATE ingredient SET name = ?, amount = ?, unit = ? WHERE id = ? AND recipeid = ?",
        )
        .bind(&ingredient.name)
        .bind(&ingredient.amount)
        .bind(&ingredient.unit)
        .bind(ingredient.id)
        .bind(recipe_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| RecipeRepositoryError::store(INGREDIENT_OP, e))?;

        if updated.rows_affected() == 0 {
            return Err(RecipeRepositoryError::Store {
                operation: INGREDIENT_OP,
                message: format!(
                    "ingredient {} does not belong to recipe {recipe_id}",
                    ingredient.id
                ),
            });
        }

        ingredient.recipe_id = recipe_id;
        reconciled.push(ingredient);
    }

    let kept = reconciled.len();
    for mut ingredient in new {
        ingredient.id = insert_ingredient(conn, &ingredient, recipe_id, INGREDIENT_OP).await?;
        ingredient.recipe_id = recipe_id;
        reconciled.push(ingredient);
    }

    debug!(
        recipe_id,
        deleted = deleted.rows_affected(),
        updated = kept,
        inserted = reconciled.len() - kept,
        "Reconciled ingredients"
    );
    Ok(reconciled)
}

/// Make the recipe's step rows match `desired`.
///
/// Each step is upserted on `(recipeid, stepnumber)`: update first, insert
/// when nothing matched. Numbers no longer present are deleted afterwards.
/// Returns the steps sorted by number; a repeated number keeps the last
/// description, matching what the upserts left in the table.
pub(super) async fn reconcile_steps(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    desired: Vec<Step>,
) -> Result<Vec<Step>, RecipeRepositoryError> {
    if desired.is_empty() {
        let deleted = sqlx::query("DELETE FROM step WHERE recipeid = ?")
            .bind(recipe_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| RecipeRepositoryError::store(STEP_OP, e))?;
        debug!(recipe_id, deleted = deleted.rows_affected(), "Cleared steps");
        return Ok(Vec::new());
    }

    let mut inserted = 0_usize;
    for step in &desired {
        let updated =
            sqlx::query("UPDATE step SET description = ? WHERE recipeid = ? AND stepnumber = ?")
                .bind(&step.description)
                .bind(recipe_id)
                .bind(step.step_number)
                .execute(&mut *conn)
                .await
                .map_err(|e| RecipeRepositoryError::store(STEP_OP, e))?;

        if updated.rows_affected() == 0 {
            insert_step(conn, step, recipe_id, STEP_OP).await?;
            inserted += 1;
        }
    }

    let mut stale = QueryBuilder::<Sqlite>::new("DELETE FROM step WHERE recipeid = ");
    stale.push_bind(recipe_id).push(" AND stepnumber NOT IN (");
    let mut numbers = stale.separated(", ");
    for step in &desired {
        numbers.push_bind(step.step_number);
    }
    numbers.push_unseparated(")");
    let deleted = stale
        .build()
        .execute(&mut *conn)
        .await
        .map_err(|e| RecipeRepositoryError::store(STEP_OP, e))?;

    debug!(
        recipe_id,
        inserted,
        deleted = deleted.rows_affected(),
        "Reconciled steps"
    );

    let mut by_number = BTreeMap::new();
    for mut step in desired {
        step.recipe_id = recipe_id;
        by_number.insert(step.step_number, step);
    }
    Ok(by_number.into_values().collect())
}
