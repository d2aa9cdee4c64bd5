//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;
use recihub_core::services::DEFAULT_PAGE_LIMIT;

/// Available commands for the recipe store.
#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and its tables if they do not exist yet
    Init,

    /// Show a recipe with its ingredients and steps
    Show {
        /// ID of the recipe
        id: i64,
        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the recipes of one owner
    List {
        /// Owner whose recipes are listed
        owner: String,
        /// Sort order: "id" or "name", optionally followed by "asc" or "desc"
        #[arg(short, long, default_value = "")]
        order: String,
        /// Number of recipes to skip
        #[arg(long, default_value_t = 0)]
        offset: i64,
        /// Maximum number of recipes to show
        #[arg(short, long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: i64,
    },

    /// Delete a recipe and all of its ingredients and steps
    Delete {
        /// ID of the recipe
        id: i64,
        /// Owner making the request
        #[arg(long, env = "RECIHUB_OWNER")]
        owner: String,
    },

    /// Set the image file name of a recipe
    SetImage {
        /// ID of the recipe
        id: i64,
        /// New image file name
        image_name: String,
        /// Owner making the request
        #[arg(long, env = "RECIHUB_OWNER")]
        owner: String,
    },

    /// Create a recipe from a JSON document
    Import {
        /// Path to the JSON file
        file: PathBuf,
        /// Store the recipe under this owner instead of the one in the file
        #[arg(long)]
        owner: Option<String>,
    },
}
