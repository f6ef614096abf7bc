//! In-memory content source for testing and fixture-driven serving.
//!
//! [`InMemoryContentSource`] keeps every node in a `HashMap` behind a
//! `RwLock`, with a secondary handle index.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use trellis_types::{ContentNode, Handle, NodeId};

use crate::error::{ContentError, ContentResult};
use crate::traits::ContentSource;

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<NodeId, ContentNode>,
    handles: HashMap<Handle, NodeId>,
}

/// An in-memory implementation of [`ContentSource`].
#[derive(Debug, Default)]
pub struct InMemoryContentSource {
    inner: RwLock<Inner>,
}

impl InMemoryContentSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Fails if its ID or handle is already taken.
    pub fn insert(&self, node: impl Into<ContentNode>) -> ContentResult<()> {
        let node = node.into();
        let mut inner = self
            .inner
            .write()
            .map_err(|e| ContentError::lookup_failed("content source", format!("lock poisoned: {e}")))?;

        if inner.nodes.contains_key(&node.id()) {
            return Err(ContentError::Duplicate {
                field: "id",
                value: node.id().to_string(),
            });
        }
        if inner.handles.contains_key(node.handle()) {
            return Err(ContentError::Duplicate {
                field: "handle",
                value: node.handle().to_string(),
            });
        }

        inner.handles.insert(node.handle().clone(), node.id());
        inner.nodes.insert(node.id(), node);
        Ok(())
    }

    /// Number of stored nodes. A poisoned lock is `LookupFailed`, as for lookups.
    pub fn len(&self) -> ContentResult<usize> {
        Ok(self.read()?.nodes.len())
    }

    pub fn is_empty(&self) -> ContentResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> ContentResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| ContentError::lookup_failed("content source", format!("lock poisoned: {e}")))
    }
}

fn sorted_by_name(mut nodes: Vec<ContentNode>) -> Vec<ContentNode> {
    nodes.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.handle().cmp(b.handle())));
    nodes
}

impl ContentSource for InMemoryContentSource {
    fn resolve_handle(&self, handle: &Handle) -> ContentResult<Option<ContentNode>> {
        let inner = self.read()?;
        Ok(inner
            .handles
            .get(handle)
            .and_then(|id| inner.nodes.get(id))
            .cloned())
    }

    fn find(&self, id: &NodeId) -> ContentResult<Option<ContentNode>> {
        Ok(self.read()?.nodes.get(id).cloned())
    }

    fn top_communities(&self) -> ContentResult<Vec<ContentNode>> {
        let inner = self.read()?;
        let tops = inner
            .nodes
            .values()
            .filter(|node| matches!(node, ContentNode::Community(c) if c.parents.is_empty()))
            .cloned()
            .collect();
        Ok(sorted_by_name(tops))
    }

    fn items_in_collection(&self, collection: &NodeId) -> ContentResult<Vec<ContentNode>> {
        let inner = self.read()?;
        let items = inner
            .nodes
            .values()
            .filter(|node| {
                matches!(node, ContentNode::Item(i) if i.owning_collection.as_ref() == Some(collection))
            })
            .cloned()
            .collect();
        Ok(sorted_by_name(items))
    }
}
