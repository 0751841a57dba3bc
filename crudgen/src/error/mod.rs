//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the generator
pub type CrudResult<T> = Result<T, CrudError>;

/// Generator error type
#[derive(Debug, Error)]
pub enum CrudError {
    /// The requested table is not present in the database
    #[error("`{0}` table not exist")]
    TableNotFound(String),

    /// A stub could not be loaded from the template store
    #[error("Stub not found: {0}")]
    TemplateNotFound(String),

    /// A stub override exists but cannot be read
    #[error("Failed to read stub {stub}: {source}")]
    TemplateUnreadable {
        /// Stub name
        stub: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A custom layout was configured but does not exist
    #[error("{0} layout not found")]
    LayoutNotFound(String),

    /// Writing a generated artifact failed
    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading an answer from the interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The database URL scheme is not one we can introspect
    #[error("Unsupported database url: {0} (expected sqlite:// or postgres://)")]
    UnsupportedDatabase(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CrudError {
    /// Whether the error only aborts the current builder rather than the run
    #[must_use]
    pub const fn is_builder_local(&self) -> bool {
        matches!(
            self,
            Self::TemplateNotFound(_) | Self::TemplateUnreadable { .. } | Self::LayoutNotFound(_)
        )
    }
}

impl From<figment::Error> for CrudError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
