//! Error types for content lookups.

use thiserror::Error;

/// Errors that can occur while talking to the content repository.
///
/// A missing object is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The backing repository failed transiently (storage unavailable, timeout).
    #[error("lookup failed for {target}: {reason}")]
    LookupFailed { target: String, reason: String },

    /// Two objects in a fixture claim the same handle or ID.
    #[error("duplicate {field} in content fixture: {value}")]
    Duplicate { field: &'static str, value: String },

    /// The fixture file could not be parsed.
    #[error("fixture parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// I/O error while reading a fixture.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub fn lookup_failed(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LookupFailed {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for content operations.
pub type ContentResult<T> = std::result::Result<T, ContentError>;
