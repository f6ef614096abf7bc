//! Shared test fixtures: a three-level hierarchy and a source that fails on demand.

use std::collections::{BTreeMap, HashSet};

use trellis_content::{ContentError, ContentResult, ContentSource, InMemoryContentSource};
use trellis_types::{Collection, Community, ContentNode, Handle, Item, NodeId};

pub struct Tree {
    pub source: InMemoryContentSource,
    pub root: NodeId,
    pub collection: NodeId,
    pub item: NodeId,
}

pub fn community(name: &str, handle: &str, parents: Vec<NodeId>) -> Community {
    Community {
        id: NodeId::new(),
        name: name.into(),
        handle: Handle::parse(handle).unwrap(),
        parents,
        metadata: BTreeMap::new(),
        logo: None,
    }
}

pub fn collection(name: &str, handle: &str, communities: Vec<NodeId>) -> Collection {
    Collection {
        id: NodeId::new(),
        name: name.into(),
        handle: Handle::parse(handle).unwrap(),
        communities,
        metadata: BTreeMap::new(),
        logo: None,
    }
}

pub fn item(name: &str, handle: &str, owner: Option<NodeId>) -> Item {
    Item {
        id: NodeId::new(),
        name: name.into(),
        handle: Handle::parse(handle).unwrap(),
        owning_collection: owner,
        metadata: BTreeMap::new(),
        bitstreams: vec![],
        archived: true,
        withdrawn: false,
    }
}

/// `10/root` (Community) → `10/xyz` (Collection) → `10/abc` (Item).
pub fn tree() -> Tree {
    let source = InMemoryContentSource::new();
    let root = community("RootCommunityName", "10/root", vec![]);
    let coll = collection("CollectionName", "10/xyz", vec![root.id]);
    let it = item("ItemName", "10/abc", Some(coll.id));
    let ids = (root.id, coll.id, it.id);
    source.insert(root).unwrap();
    source.insert(coll).unwrap();
    source.insert(it).unwrap();
    Tree {
        source,
        root: ids.0,
        collection: ids.1,
        item: ids.2,
    }
}

/// Wraps a source and fails every lookup touching one of `failing`.
pub struct FlakySource<S> {
    pub inner: S,
    pub failing_ids: HashSet<NodeId>,
    pub failing_handles: HashSet<String>,
}

impl<S> FlakySource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failing_ids: HashSet::new(),
            failing_handles: HashSet::new(),
        }
    }
}

impl<S: ContentSource> ContentSource for FlakySource<S> {
    fn resolve_handle(&self, handle: &Handle) -> ContentResult<Option<ContentNode>> {
        if self.failing_handles.contains(&handle.to_string()) {
            return Err(ContentError::lookup_failed(handle.to_string(), "storage unavailable"));
        }
        self.inner.resolve_handle(handle)
    }

    fn find(&self, id: &NodeId) -> ContentResult<Option<ContentNode>> {
        if self.failing_ids.contains(id) {
            return Err(ContentError::lookup_failed(id.to_string(), "storage unavailable"));
        }
        self.inner.find(id)
    }

    fn top_communities(&self) -> ContentResult<Vec<ContentNode>> {
        self.inner.top_communities()
    }

    fn items_in_collection(&self, collection: &NodeId) -> ContentResult<Vec<ContentNode>> {
        self.inner.items_in_collection(collection)
    }
}
