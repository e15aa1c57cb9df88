//! Error types for the registry.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors produced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The submission was rejected before anything was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The relational store failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Writing the image file (or creating its directory) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation pattern failed to compile.
    #[error("invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Another thread panicked while holding the registry lock.
    #[error("registry lock poisoned")]
    LockPoisoned,
}
