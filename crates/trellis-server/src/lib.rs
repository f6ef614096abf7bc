//! HTTP front-end for Trellis.
//!
//! Serves the handle routes (`/handle/{prefix}/{suffix}[/edit]`), which
//! forward to the kind-specific pages, plus the home page, bitstream
//! lookups, and themed error pages. Pages are returned as JSON
//! [`PageContext`](trellis_present::PageContext) documents.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::BitstreamDescriptor;
pub use server::TrellisServer;
pub use state::{AppState, ErrorPage, SharedSource};
