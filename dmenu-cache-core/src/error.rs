//! Error types for dmenu-cache.
//!
//! A single error enum built on `thiserror`. Storage failures carry the
//! underlying I/O or JSON error; contract violations (using a closed session,
//! removing an absent term) carry just enough context to locate the bug.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CacheError`.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Main error type for all dmenu-cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    // ═══════════════════════════════════════════════════════════════════════════
    // SESSION CONTRACT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The cache was used before it was opened or after it was closed.
    #[error("Cache unavailable outside active session")]
    SessionClosed,

    /// `remove` was called for a term the table does not hold.
    #[error("Term not found: {0}")]
    TermNotFound(String),

    /// An empty (or whitespace-only) term was offered to the table.
    #[error("Empty term")]
    EmptyTerm,

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The directory holding the cache file could not be created.
    #[error("Failed to create cache directory '{}': {source}", path.display())]
    StorageDirectory {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CacheError {
    /// Returns true if this error signals misuse of the cache API rather
    /// than a problem with the environment.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            CacheError::SessionClosed | CacheError::TermNotFound(_) | CacheError::EmptyTerm
        )
    }

    /// Returns true if this error came from reading or writing the cache file.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            CacheError::StorageDirectory { .. } | CacheError::IoError(_) | CacheError::JsonError(_)
        )
    }
}
