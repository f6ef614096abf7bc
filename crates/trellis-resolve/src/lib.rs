//! Identifier resolution for Trellis.
//!
//! A request path flows through three stages:
//!
//! 1. [`PathParser`] splits `/handle/{prefix}/{suffix}/{extra}` into an
//!    [`ObjectPath`].
//! 2. [`ObjectDispatcher`] resolves the handle through a
//!    [`ContentSource`](trellis_content::ContentSource) and picks the
//!    kind-specific [`Route`] by matching on the resolved node.
//! 3. [`HierarchyWalker`] follows parent links to produce the root-first
//!    ancestor chain used for breadcrumbs and theming.
//!
//! # Modules
//!
//! - [`error`]: [`ResolveError`]: invalid paths and not-found objects
//! - [`path`]: Request path parsing
//! - [`dispatch`]: Handle resolution and routing by kind
//! - [`hierarchy`]: Parent chain traversal

pub mod dispatch;
pub mod error;
pub mod hierarchy;
pub mod path;

#[cfg(test)]
mod testing;

pub use dispatch::{Action, Dispatch, ObjectDispatcher, Route};
pub use error::{ResolveError, ResolveResult};
pub use hierarchy::{HierarchyWalker, MAX_DEPTH};
pub use path::{ObjectPath, PathParser, HANDLE_MOUNT};
