//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`LookupError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use musophile::error::{Error, Result, ResultExt};
//!
//! fn load_page(path: &Path) -> Result<PageInputs> {
//!     let html = std::fs::read_to_string(path).with_context("reading page")?;
//!     Ok(PageInputs::from_html(&html))
//! }
//! ```

use crate::config::ConfigError;
use crate::search::domain::{LookupError, QueryError};

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata search or track lookup error
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Rejected search input
    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    /// Search page could not be used for bootstrap
    #[error("Page error: {0}")]
    Page(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a page error.
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::page("no #token element");
        assert!(err.to_string().contains("no #token element"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(ConfigError::NoConfigDir).context("while saving config");
        let msg = err.to_string();
        assert!(msg.contains("while saving config"));
        assert!(msg.contains("config directory"));
    }

    #[test]
    fn test_lookup_error_converts() {
        let err: Error = LookupError::RateLimited.into();
        assert!(matches!(err, Error::Lookup(LookupError::RateLimited)));
    }

    #[test]
    fn test_query_error_converts() {
        let err: Error = QueryError::EmptyTerm.into();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::page("empty"));
        let with_ctx = result.with_context("reading search page");
        assert!(with_ctx.unwrap_err().to_string().contains("reading search page"));
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.with_context("opening page").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
    }
}
