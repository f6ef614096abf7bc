//! Foundation types for Trellis.
//!
//! Trellis is a repository front-end that resolves persistent identifiers
//! ("handles") to content objects and presents them within their containment
//! hierarchy. This crate holds the identity and structural types every other
//! Trellis crate depends on.
//!
//! # Key Types
//!
//! - [`Handle`]: Persistent `prefix/suffix` identifier
//! - [`NodeId`]: Surrogate UUID identifier of a stored object
//! - [`NodeKind`]: Community, Collection, or Item
//! - [`ContentNode`]: Tagged sum type over the three kinds
//! - [`Bitstream`]: A file attached to an item (or used as a logo)

pub mod error;
pub mod handle;
pub mod node;

pub use error::TypeError;
pub use handle::Handle;
pub use node::{Bitstream, Collection, Community, ContentNode, Item, NodeId, NodeKind};
