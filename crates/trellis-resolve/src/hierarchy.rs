//! Parent chain traversal.
//!
//! Every node has at most one parent that matters for presentation: a
//! Community's first parent Community, a Collection's first Community, an
//! Item's owning Collection. [`HierarchyWalker::ancestors`] follows that
//! relation upward and returns the chain root-first.
//!
//! # Invariants
//!
//! - The result is never empty and always ends with the starting node.
//! - A failed or dangling parent lookup ends the chain there; the partial
//!   chain is still returned.
//! - The walk stops after [`MAX_DEPTH`] nodes or on a revisited node, so a
//!   corrupted (cyclic) parent graph cannot loop forever.

use std::collections::HashSet;

use tracing::{debug, warn};

use trellis_content::ContentSource;
use trellis_types::ContentNode;

/// Upper bound on the length of an ancestor chain.
pub const MAX_DEPTH: usize = 64;

/// Walks parent links through a [`ContentSource`].
pub struct HierarchyWalker<'a, S: ?Sized> {
    source: &'a S,
    max_depth: usize,
}

impl<'a, S: ContentSource + ?Sized> HierarchyWalker<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_depth: MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// The ancestor chain of `node`, root first, ending with `node` itself.
    pub fn ancestors(&self, node: &ContentNode) -> Vec<ContentNode> {
        let mut chain = vec![node.clone()];
        let mut visited = HashSet::from([node.id()]);
        let mut next = node.parent();
        let mut expected = node.kind().parent_kind();

        while let Some(parent_id) = next {
            if chain.len() >= self.max_depth {
                warn!(handle = %node.handle(), depth = chain.len(), "ancestor walk hit depth cap");
                break;
            }
            if !visited.insert(parent_id) {
                warn!(handle = %node.handle(), parent = %parent_id, "cycle in parent graph");
                break;
            }

            match self.source.find_kind(expected, &parent_id) {
                Ok(Some(parent)) => {
                    debug!(parent = %parent.handle(), kind = %parent.kind(), "walked to parent");
                    next = parent.parent();
                    expected = parent.kind().parent_kind();
                    chain.push(parent);
                }
                Ok(None) => {
                    warn!(parent = %parent_id, kind = %expected, "dangling parent reference");
                    break;
                }
                Err(e) => {
                    warn!(parent = %parent_id, error = %e, "parent lookup failed, truncating chain");
                    break;
                }
            }
        }

        chain.reverse();
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{collection, community, item, tree, FlakySource};
    use trellis_content::InMemoryContentSource;
    use trellis_types::{NodeId, NodeKind};

    fn names(chain: &[ContentNode]) -> Vec<&str> {
        chain.iter().map(ContentNode::name).collect()
    }

    #[test]
    fn item_chain_is_root_first() {
        let t = tree();
        let item = t.source.find(&t.item).unwrap().unwrap();
        let chain = HierarchyWalker::new(&t.source).ancestors(&item);
        assert_eq!(names(&chain), vec!["RootCommunityName", "CollectionName", "ItemName"]);
        assert_eq!(chain.last().unwrap().id(), t.item);
    }

    #[test]
    fn top_level_community_is_alone() {
        let t = tree();
        let root = t.source.find(&t.root).unwrap().unwrap();
        let chain = HierarchyWalker::new(&t.source).ancestors(&root);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id(), t.root);
    }

    #[test]
    fn walk_is_idempotent() {
        let t = tree();
        let item = t.source.find(&t.item).unwrap().unwrap();
        let walker = HierarchyWalker::new(&t.source);
        assert_eq!(walker.ancestors(&item), walker.ancestors(&item));
    }

    #[test]
    fn nested_communities() {
        let source = InMemoryContentSource::new();
        let top = community("Top", "1/1", vec![]);
        let mid = community("Mid", "1/2", vec![top.id]);
        let leaf = community("Leaf", "1/3", vec![mid.id]);
        let leaf_node = ContentNode::from(leaf.clone());
        source.insert(top).unwrap();
        source.insert(mid).unwrap();
        source.insert(leaf).unwrap();

        let chain = HierarchyWalker::new(&source).ancestors(&leaf_node);
        assert_eq!(names(&chain), vec!["Top", "Mid", "Leaf"]);
    }

    #[test]
    fn dangling_parent_truncates() {
        let source = InMemoryContentSource::new();
        let orphan = ContentNode::from(item("Orphan", "1/9", Some(NodeId::new())));
        let chain = HierarchyWalker::new(&source).ancestors(&orphan);
        assert_eq!(names(&chain), vec!["Orphan"]);
    }

    #[test]
    fn lookup_failure_truncates() {
        let t = tree();
        let item = t.source.find(&t.item).unwrap().unwrap();
        let mut flaky = FlakySource::new(t.source);
        flaky.failing_ids.insert(t.root);

        let chain = HierarchyWalker::new(&flaky).ancestors(&item);
        assert_eq!(names(&chain), vec!["CollectionName", "ItemName"]);
    }

    #[test]
    fn parent_of_wrong_kind_truncates() {
        let source = InMemoryContentSource::new();
        let other = item("Not a collection", "1/1", None);
        let child = ContentNode::from(item("Child", "1/2", Some(other.id)));
        source.insert(other).unwrap();

        let chain = HierarchyWalker::new(&source).ancestors(&child);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].kind(), NodeKind::Item);
    }

    #[test]
    fn cycle_is_cut() {
        let source = InMemoryContentSource::new();
        let mut a = community("A", "1/1", vec![]);
        let b = community("B", "1/2", vec![a.id]);
        a.parents = vec![b.id];
        let start = ContentNode::from(a.clone());
        source.insert(a).unwrap();
        source.insert(b).unwrap();

        let chain = HierarchyWalker::new(&source).ancestors(&start);
        assert_eq!(names(&chain), vec!["B", "A"]);
    }

    #[test]
    fn depth_cap_applies() {
        let source = InMemoryContentSource::new();
        let mut parent: Option<NodeId> = None;
        let mut last = None;
        for i in 0..10 {
            let c = community(&format!("C{i}"), &format!("1/{i}"), parent.into_iter().collect());
            parent = Some(c.id);
            last = Some(ContentNode::from(c.clone()));
            source.insert(c).unwrap();
        }
        let leaf = last.unwrap();
        let chain = HierarchyWalker::new(&source).with_max_depth(4).ancestors(&leaf);
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.last().unwrap().name(), "C9");
    }

    #[test]
    fn collection_under_first_community() {
        let source = InMemoryContentSource::new();
        let first = community("First", "1/1", vec![]);
        let second = community("Second", "1/2", vec![]);
        let coll = ContentNode::from(collection("Coll", "1/3", vec![first.id, second.id]));
        source.insert(first).unwrap();
        source.insert(second).unwrap();

        let chain = HierarchyWalker::new(&source).ancestors(&coll);
        assert_eq!(names(&chain), vec!["First", "Coll"]);
    }
}
