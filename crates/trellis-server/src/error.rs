use axum::http::StatusCode;
use thiserror::Error;

use trellis_content::ContentError;
use trellis_resolve::ResolveError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn not_found(target: impl Into<String>) -> Self {
        Self::Resolve(ResolveError::not_found(target))
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Resolve(ResolveError::InvalidPath { .. }) => StatusCode::BAD_REQUEST,
            Self::Resolve(ResolveError::NotFound { .. }) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
