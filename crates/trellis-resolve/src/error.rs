//! Error types for identifier resolution.

use thiserror::Error;

/// Errors surfaced at the request boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The request path does not have the `/handle/{prefix}/{suffix}` shape.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Nothing (of the expected kind) lives at this path or identifier.
    #[error("{target} not found")]
    NotFound { target: String },
}

impl ResolveError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(target: impl Into<String>) -> Self {
        Self::NotFound {
            target: target.into(),
        }
    }
}

/// Convenience type alias for resolution operations.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
