//! The [`ContentSource`] trait defining the content lookup interface.

use trellis_types::{ContentNode, Handle, NodeId, NodeKind};

use crate::error::ContentResult;

/// Read-only access to the external content repository.
///
/// Implementations must be thread-safe (`Send + Sync`). Every lookup:
///
/// - returns `Ok(None)` when the object does not exist,
/// - returns `Err(ContentError::LookupFailed)` only for transient failures of
///   the backing store,
/// - never creates or mutates objects.
pub trait ContentSource: Send + Sync {
    /// Resolve a handle to the object it names.
    fn resolve_handle(&self, handle: &Handle) -> ContentResult<Option<ContentNode>>;

    /// Find an object by its surrogate ID, whatever its kind.
    fn find(&self, id: &NodeId) -> ContentResult<Option<ContentNode>>;

    /// All communities without a parent community, ordered by name.
    fn top_communities(&self) -> ContentResult<Vec<ContentNode>>;

    /// Items owned by a collection, ordered by name.
    fn items_in_collection(&self, collection: &NodeId) -> ContentResult<Vec<ContentNode>>;

    /// Find an object by ID, returning `Ok(None)` if it exists with a
    /// different kind.
    fn find_kind(&self, kind: NodeKind, id: &NodeId) -> ContentResult<Option<ContentNode>> {
        Ok(self.find(id)?.filter(|node| node.kind() == kind))
    }
}

macro_rules! forward_content_source {
    ($($ty:ty),*) => {$(
        impl<T: ContentSource + ?Sized> ContentSource for $ty {
            fn resolve_handle(&self, handle: &Handle) -> ContentResult<Option<ContentNode>> {
                (**self).resolve_handle(handle)
            }

            fn find(&self, id: &NodeId) -> ContentResult<Option<ContentNode>> {
                (**self).find(id)
            }

            fn top_communities(&self) -> ContentResult<Vec<ContentNode>> {
                (**self).top_communities()
            }

            fn items_in_collection(&self, collection: &NodeId) -> ContentResult<Vec<ContentNode>> {
                (**self).items_in_collection(collection)
            }

            fn find_kind(&self, kind: NodeKind, id: &NodeId) -> ContentResult<Option<ContentNode>> {
                (**self).find_kind(kind, id)
            }
        }
    )*};
}

forward_content_source!(&T, std::sync::Arc<T>, Box<T>);
