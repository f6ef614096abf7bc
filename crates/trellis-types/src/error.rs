use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid handle {value:?}: {reason}")]
    InvalidHandle { value: String, reason: String },

    #[error("invalid node id: {0}")]
    InvalidNodeId(String),
}
