//! Init command handler.
//!
//! Bootstrap already created the database and schema; this only reports
//! where they live.

use crate::bootstrap::CliContext;

/// Execute the init command.
pub fn execute(ctx: &CliContext) {
    println!("Recipe database ready at {}", ctx.db_path().display());
}
