//! Unified error handling for docgen
//!
//! Only collaborator-level failures surface as errors. Symbols that cannot be
//! resolved and types that cannot be classified are absorbed into the model
//! as omissions or degraded variants instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for docgen operations
pub type Result<T> = std::result::Result<T, DocgenError>;

/// Unified error type for all docgen operations
#[derive(Error, Debug)]
pub enum DocgenError {
    /// No tsconfig.json next to the project root
    #[error("Project configuration not found in {0}")]
    ProjectConfigNotFound(PathBuf),

    /// Entry file heuristics found nothing
    #[error("No entry file found for project at {0}")]
    EntryNotFound(PathBuf),

    /// The entry file exists on disk but the oracle's program does not contain it
    #[error("Entry file is not part of the analyzed program: {0}")]
    EntryNotInProgram(PathBuf),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl DocgenError {
    /// Create a missing project configuration error
    pub fn project_config_not_found(root: impl Into<PathBuf>) -> Self {
        Self::ProjectConfigNotFound(root.into())
    }

    /// Create a missing entry file error
    pub fn entry_not_found(root: impl Into<PathBuf>) -> Self {
        Self::EntryNotFound(root.into())
    }

    /// Create an entry-not-in-program error
    pub fn entry_not_in_program(entry: impl Into<PathBuf>) -> Self {
        Self::EntryNotInProgram(entry.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
