//! List command handler.
//!
//! Shows one page of an owner's recipes. Only the parent rows are loaded;
//! use `show` for ingredients and steps.

use recihub_core::RecipePage;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the list command.
pub async fn execute(
    ctx: &CliContext,
    owner: &str,
    order: &str,
    offset: i64,
    limit: i64,
) -> Result<(), CliError> {
    let page = ctx
        .recipes()
        .get_recipes_for_owner(owner, order, offset, limit)
        .await?;

    if page.recipes.is_empty() {
        println!("No recipes found for '{owner}'.");
        return Ok(());
    }

    for line in render_page(&page) {
        println!("{line}");
    }
    Ok(())
}

/// Format a page as a header line followed by one line per recipe.
pub fn render_page(page: &RecipePage) -> Vec<String> {
    let first = page.offset + 1;
    let last = page.offset + i64::try_from(page.recipes.len()).unwrap_or(i64::MAX);

    let mut lines = Vec::with_capacity(page.recipes.len() + 1);
    lines.push(format!("Recipes {first}-{last} of {}", page.total));
    lines.extend(page.recipes.iter().map(|recipe| {
        if recipe.image_name.is_empty() {
            format!("{:>6}  {}", recipe.id, recipe.name)
        } else {
            format!("{:>6}  {} [{}]", recipe.id, recipe.name, recipe.image_name)
        }
    }));
    lines
}
