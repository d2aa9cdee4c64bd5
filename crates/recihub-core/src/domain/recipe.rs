//! Recipe aggregate domain types.
//!
//! A `Recipe` owns its `Ingredient` and `Step` children. The aggregate is
//! persisted and mutated as one unit; these types carry no storage details.

use serde::{Deserialize, Serialize};

/// A recipe together with its ingredients and steps.
///
/// An `id` of `0` means the recipe has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    /// Opaque identifier of the owning profile.
    pub owner: String,
    /// Stored image file name; empty when no image was uploaded.
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Create an unpersisted recipe with no children.
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            ..Self::default()
        }
    }

    /// Add an ingredient.
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Add a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Whether the store has assigned an identity to this recipe.
    pub const fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// An ingredient row owned by a recipe.
///
/// An `id` of `0` marks an ingredient that should be inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub amount: String,
    pub unit: String,
    /// Back-reference set by the repository; never trusted from callers.
    #[serde(default)]
    pub recipe_id: i64,
}

impl Ingredient {
    /// Create an unpersisted ingredient.
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            unit: unit.into(),
            ..Self::default()
        }
    }

    /// Create an ingredient that refers to an already stored row.
    pub fn existing(
        id: i64,
        name: impl Into<String>,
        amount: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id,
            ..Self::new(name, amount, unit)
        }
    }

    pub const fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// A numbered preparation step.
///
/// Steps have no surrogate id: `(recipe_id, step_number)` is the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step_number: i64,
    pub description: String,
    #[serde(default)]
    pub recipe_id: i64,
}

impl Step {
    pub fn new(step_number: i64, description: impl Into<String>) -> Self {
        Self {
            step_number,
            description: description.into(),
            recipe_id: 0,
        }
    }
}
