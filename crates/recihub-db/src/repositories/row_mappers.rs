//! Row types and mapping helpers for recipe queries.

use recihub_core::{Ingredient, Recipe, RecipeOrder, RecipeRepositoryError, Step};

/// Shared SELECT column list for recipe parent rows.
pub const RECIPE_SELECT_COLUMNS: &str = "id, name, username, imagename";

#[derive(sqlx::FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub imagename: Option<String>,
}

#[derive(sqlx::FromRow)]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub amount: String,
    pub unit: String,
    pub recipeid: i64,
}

#[derive(sqlx::FromRow)]
pub struct StepRow {
    pub stepnumber: i64,
    pub description: String,
    pub recipeid: i64,
}

impl RecipeRow {
    /// Convert to a domain `Recipe` with the given children.
    pub fn into_recipe(self, ingredients: Vec<Ingredient>, steps: Vec<Step>) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name,
            owner: self.username,
            image_name: self.imagename.unwrap_or_default(),
            ingredients,
            steps,
        }
    }
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            amount: row.amount,
            unit: row.unit,
            recipe_id: row.recipeid,
        }
    }
}

impl From<StepRow> for Step {
    fn from(row: StepRow) -> Self {
        Self {
            step_number: row.stepnumber,
            description: row.description,
            recipe_id: row.recipeid,
        }
    }
}

/// `ORDER BY` fragment for a listing order.
///
/// The fragment comes from this fixed table, never from caller text.
pub const fn order_by_clause(order: RecipeOrder) -> &'static str {
    match order {
        RecipeOrder::IdAsc => "id ASC",
        RecipeOrder::IdDesc => "id DESC",
        RecipeOrder::NameAsc => "name ASC, id ASC",
        RecipeOrder::NameDesc => "name DESC, id DESC",
    }
}

/// Check the rowid reported for an insert.
///
/// `SQLite` rowids of AUTOINCREMENT tables start at 1, so anything else means
/// the insert did not produce a row we can refer to.
pub fn require_identity(rowid: i64, entity: &'static str) -> Result<i64, RecipeRepositoryError> {
    if rowid > 0 {
        Ok(rowid)
    } else {
        Err(RecipeRepositoryError::NoIdentityGenerated(entity))
    }
}
