//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `RecipeServiceError` to exit codes and user-facing messages.

use recihub_core::RecipeServiceError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested recipe does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The recipe belongs to someone else.
    #[error("{0}")]
    Forbidden(String),

    /// Argument or input document error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound(_) | Self::Forbidden(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }
}

impl From<RecipeServiceError> for CliError {
    fn from(err: RecipeServiceError) -> Self {
        match err {
            RecipeServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            RecipeServiceError::Forbidden(_) => Self::Forbidden(err.to_string()),
            RecipeServiceError::InvalidRecipe
            | RecipeServiceError::InvalidIngredient
            | RecipeServiceError::InvalidOrder(_) => Self::Arguments(err.to_string()),
            RecipeServiceError::Repository(repo_err) => Self::Database(repo_err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Arguments(format!("invalid recipe document: {err}"))
    }
}
