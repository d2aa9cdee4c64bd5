//! Show command handler.
//!
//! Prints a single recipe with its ingredients and steps, either as
//! readable text or as the JSON document accepted by `import`.

use std::fmt::Write as _;

use recihub_core::Recipe;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the show command.
pub async fn execute(ctx: &CliContext, id: i64, json: bool) -> Result<(), CliError> {
    let recipe = ctx.recipes().get_recipe(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        print!("{}", render_recipe(&recipe));
    }
    Ok(())
}

/// Format a recipe for the terminal.
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{}) by {}", recipe.name, recipe.id, recipe.owner);
    if !recipe.image_name.is_empty() {
        let _ = writeln!(out, "Image: {}", recipe.image_name);
    }

    let _ = writeln!(out, "\nIngredients:");
    if recipe.ingredients.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for ingredient in &recipe.ingredients {
        let _ = writeln!(
            out,
            "  - {} {} {}",
            ingredient.amount, ingredient.unit, ingredient.name
        );
    }

    let _ = writeln!(out, "\nSteps:");
    if recipe.steps.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for step in &recipe.steps {
        let _ = writeln!(out, "  {}. {}", step.step_number, step.description);
    }
    out
}
