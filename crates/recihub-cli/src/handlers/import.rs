//! Import command handler.
//!
//! Creates a recipe from a JSON document shaped like the output of
//! `show --json`. Ids in the document are ignored; the store assigns new
//! ones.

use std::path::Path;

use recihub_core::Recipe;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the import command.
pub async fn execute(
    ctx: &CliContext,
    file: &Path,
    owner: Option<String>,
) -> Result<(), CliError> {
    let document = tokio::fs::read_to_string(file).await?;
    let recipe = parse_document(&document, owner)?;
    debug!(
        file = %file.display(),
        ingredients = recipe.ingredients.len(),
        steps = recipe.steps.len(),
        "Parsed recipe document"
    );

    let created = ctx.recipes().create_recipe(recipe).await?;
    println!("Imported '{}' as recipe {}.", created.name, created.id);
    Ok(())
}

/// Parse a recipe document, dropping any ids it carries.
pub fn parse_document(document: &str, owner: Option<String>) -> Result<Recipe, CliError> {
    let mut recipe: Recipe = serde_json::from_str(document)?;

    recipe.id = 0;
    for ingredient in &mut recipe.ingredients {
        ingredient.id = 0;
    }
    if let Some(owner) = owner {
        recipe.owner = owner;
    }
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use tokio_test::assert_ok;

    const DOCUMENT: &str = r#"{
        "id": 99,
        "name": "Pancakes",
        "owner": "alice",
        "ingredients": [
            {"id": 5, "name": "Flour", "amount": "200", "unit": "g"},
            {"name": "Milk", "amount": "300", "unit": "ml"}
        ],
        "steps": [
            {"step_number": 1, "description": "Whisk"},
            {"step_number": 2, "description": "Fry"}
        ]
    }"#;

    #[test]
    fn test_parse_document_clears_ids() {
        let recipe = parse_document(DOCUMENT, Some("bob".to_string())).unwrap();

        assert_eq!(recipe.id, 0);
        assert!(recipe.ingredients.iter().all(|i| i.id == 0));
        assert_eq!(recipe.owner, "bob");
        assert_eq!(recipe.steps.len(), 2);
    }

    #[tokio::test]
    async fn test_import_creates_recipe() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pancakes.json");
        std::fs::write(&file, DOCUMENT).unwrap();
        let ctx = bootstrap(CliConfig {
            db_path: dir.path().join("recihub.db"),
        })
        .await
        .unwrap();

        assert_ok!(execute(&ctx, &file, None).await);

        let page = ctx
            .recipes()
            .get_recipes_for_owner("alice", "", 0, 10)
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        let stored = ctx.recipes().get_recipe(page.recipes[0].id).await.unwrap();
        assert_eq!(stored.ingredients.len(), 2);
        assert_ne!(stored.ingredients[0].id, 5);
        assert_eq!(stored.steps[1].description, "Fry");
    }

    #[tokio::test]
    async fn test_import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = bootstrap(CliConfig {
            db_path: dir.path().join("recihub.db"),
        })
        .await
        .unwrap();

        let err = execute(&ctx, &dir.path().join("nope.json"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
