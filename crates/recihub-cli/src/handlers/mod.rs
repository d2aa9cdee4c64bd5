//! Command handlers that delegate to `RecipeService`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that parse CLI input, call the service and format
//!   output for the terminal
//!
//! Handlers should NOT access repositories or the database directly.

pub mod delete;
pub mod import;
pub mod init;
pub mod list;
pub mod set_image;
pub mod show;

use crate::bootstrap::CliContext;
use crate::commands::Commands;
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(ctx: &CliContext, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Init => {
            init::execute(ctx);
            Ok(())
        }
        Commands::Show { id, json } => show::execute(ctx, id, json).await,
        Commands::List {
            owner,
            order,
            offset,
            limit,
        } => list::execute(ctx, &owner, &order, offset, limit).await,
        Commands::Delete { id, owner } => delete::execute(ctx, id, &owner).await,
        Commands::SetImage {
            id,
            image_name,
            owner,
        } => set_image::execute(ctx, id, &owner, &image_name).await,
        Commands::Import { file, owner } => import::execute(ctx, &file, owner).await,
    }
}
