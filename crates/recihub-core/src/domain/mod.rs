//! Domain types for the recipe aggregate.
//!
//! These types represent recipes independent of any infrastructure concerns.

mod listing;
mod recipe;

pub use listing::{RecipeOrder, RecipePage};
pub use recipe::{Ingredient, Recipe, Step};
