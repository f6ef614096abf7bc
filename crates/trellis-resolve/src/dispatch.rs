//! Handle resolution and routing by object kind.
//!
//! A single path pattern (`/handle/{prefix}/{suffix}`) is shared by all
//! three kinds, so the route is chosen from the resolved node, never from
//! the shape of the path.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use trellis_content::ContentSource;
use trellis_types::{ContentNode, Handle, NodeId, NodeKind};

use crate::error::{ResolveError, ResolveResult};
use crate::path::{ObjectPath, PathParser};

/// What the request wants to do with the object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Edit,
}

impl Action {
    /// Map the residual path of a handle request to an action.
    ///
    /// Returns `None` for residual paths no handle route serves.
    pub fn from_extra(extra: &str) -> Option<Self> {
        match extra.trim_end_matches('/') {
            "" => Some(Self::View),
            "edit" => Some(Self::Edit),
            _ => None,
        }
    }
}

/// A kind-specific presentation route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Route {
    Community { id: NodeId, action: Action },
    Collection { id: NodeId, action: Action },
    Item { id: NodeId, action: Action },
}

impl Route {
    /// Path segment the kind-specific routes are mounted under.
    pub fn segment(kind: NodeKind) -> &'static str {
        match kind {
            NodeKind::Community => "communities",
            NodeKind::Collection => "collections",
            NodeKind::Item => "items",
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Community { .. } => NodeKind::Community,
            Self::Collection { .. } => NodeKind::Collection,
            Self::Item { .. } => NodeKind::Item,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::Community { id, .. } | Self::Collection { id, .. } | Self::Item { id, .. } => *id,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Self::Community { action, .. }
            | Self::Collection { action, .. }
            | Self::Item { action, .. } => *action,
        }
    }

    /// The forward target, e.g. `/items/{id}` or `/collections/{id}/edit`.
    pub fn path(&self) -> String {
        let base = format!("/{}/{}", Self::segment(self.kind()), self.id());
        match self.action() {
            Action::View => base,
            Action::Edit => format!("{base}/edit"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of dispatching a handle request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub path: ObjectPath,
    pub node: ContentNode,
    pub route: Route,
}

/// Resolves identifiers through a [`ContentSource`] and routes by kind.
///
/// Holds no state beyond the source; every call is independent.
pub struct ObjectDispatcher<S> {
    source: S,
    parser: PathParser,
}

impl<S: ContentSource> ObjectDispatcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            parser: PathParser::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve a handle. Misses and failed lookups both surface as `NotFound`.
    pub fn resolve(&self, handle: &Handle) -> ResolveResult<ContentNode> {
        self.resolve_for(handle, &handle.to_string())
    }

    /// Resolve a surrogate ID for a kind-specific route.
    ///
    /// A node of a different kind is `NotFound` for that route.
    pub fn resolve_kind(&self, kind: NodeKind, id: &NodeId) -> ResolveResult<ContentNode> {
        let target = || format!("{kind} with ID={id}");
        match self.source.find_kind(kind, id) {
            Ok(Some(node)) => Ok(node),
            Ok(None) => Err(ResolveError::not_found(target())),
            Err(e) => {
                warn!(%id, %kind, error = %e, "lookup failed");
                Err(ResolveError::not_found(target()))
            }
        }
    }

    /// Route a resolved node. Exhaustive over every kind.
    pub fn route(node: &ContentNode, action: Action) -> Route {
        match node {
            ContentNode::Community(c) => Route::Community { id: c.id, action },
            ContentNode::Collection(c) => Route::Collection { id: c.id, action },
            ContentNode::Item(i) => Route::Item { id: i.id, action },
        }
    }

    /// Parse a `/handle/...` request path, resolve it, and pick the route.
    pub fn dispatch(&self, raw_path: &str) -> ResolveResult<Dispatch> {
        let path = self.parser.parse(raw_path)?;
        let action =
            Action::from_extra(&path.extra).ok_or_else(|| ResolveError::not_found(raw_path))?;
        let handle = path.handle()?;
        let node = self.resolve_for(&handle, raw_path)?;
        let route = Self::route(&node, action);
        debug!(%handle, %route, "dispatched handle request");
        Ok(Dispatch { path, node, route })
    }

    fn resolve_for(&self, handle: &Handle, target: &str) -> ResolveResult<ContentNode> {
        match self.source.resolve_handle(handle) {
            Ok(Some(node)) => Ok(node),
            Ok(None) => Err(ResolveError::not_found(target)),
            Err(e) => {
                warn!(%handle, error = %e, "handle lookup failed");
                Err(ResolveError::not_found(target))
            }
        }
    }
}
