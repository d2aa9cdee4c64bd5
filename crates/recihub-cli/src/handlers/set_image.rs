//! Set-image command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the set-image command.
pub async fn execute(
    ctx: &CliContext,
    id: i64,
    owner: &str,
    image_name: &str,
) -> Result<(), CliError> {
    if image_name.trim().is_empty() {
        return Err(CliError::Arguments("image name must not be empty".to_string()));
    }

    ctx.recipes().update_image_name(id, owner, image_name).await?;
    println!("Recipe {id} now uses image '{image_name}'.");
    Ok(())
}
