//! Delete command handler.
//!
//! Removes a recipe together with its ingredients and steps. Only the
//! recipe's owner may delete it.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the delete command.
pub async fn execute(ctx: &CliContext, id: i64, owner: &str) -> Result<(), CliError> {
    ctx.recipes().remove_recipe(id, owner).await?;
    println!("Recipe {id} deleted.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use recihub_core::Recipe;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_only_owner_can_delete() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = bootstrap(CliConfig {
            db_path: dir.path().join("recihub.db"),
        })
        .await
        .unwrap();
        let recipe = ctx
            .recipes()
            .create_recipe(Recipe::new("Soup", "alice"))
            .await
            .unwrap();

        let err = assert_err!(execute(&ctx, recipe.id, "mallory").await);
        assert!(matches!(err, CliError::Forbidden(_)));

        assert_ok!(execute(&ctx, recipe.id, "alice").await);
        let err = assert_err!(execute(&ctx, recipe.id, "alice").await);
        assert!(matches!(err, CliError::NotFound(_)));
    }
}
