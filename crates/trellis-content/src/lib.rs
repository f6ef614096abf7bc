//! Content lookup for Trellis.
//!
//! The authoritative object graph lives in an external repository layer.
//! This crate defines the narrow interface Trellis consumes from it and an
//! in-memory backend used by tests and by the fixture-driven server.
//!
//! # Modules
//!
//! - [`error`]: Error types for lookups and fixture loading
//! - [`traits`]: The [`ContentSource`] trait
//! - [`memory`]: [`InMemoryContentSource`], a `HashMap`-backed source
//! - [`fixture`]: TOML fixture files describing a content hierarchy

pub mod error;
pub mod fixture;
pub mod memory;
pub mod traits;

pub use error::{ContentError, ContentResult};
pub use fixture::ContentFixture;
pub use memory::InMemoryContentSource;
pub use traits::ContentSource;
