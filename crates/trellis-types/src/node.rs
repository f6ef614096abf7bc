//! The content hierarchy: Community → Collection → Item.
//!
//! [`ContentNode`] is a tagged variant over the three kinds. Each kind carries
//! its own parent relation:
//!
//! - a Community lists zero or more parent Communities,
//! - a Collection lists the Communities that contain it,
//! - an Item names a single owning Collection.
//!
//! Only the first listed parent takes part in hierarchy walks.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::handle::Handle;

/// Surrogate identifier of a stored object (UUID).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(uuid::Uuid);

impl NodeId {
    /// Generate a new time-ordered node ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for NodeId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidNodeId(format!("{s:?}: {e}")))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three kinds of content object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Community,
    Collection,
    Item,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::Collection => "collection",
            Self::Item => "item",
        }
    }

    /// Kind of the node reached by following this kind's parent relation.
    ///
    /// Communities nest under Communities, Collections under Communities, and
    /// Items under their owning Collection.
    pub fn parent_kind(&self) -> NodeKind {
        match self {
            Self::Community | Self::Collection => Self::Community,
            Self::Item => Self::Collection,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to an item, or the logo of a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitstream {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "application/octet-stream".into()
}

/// A top-level or nested community.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: NodeId,
    pub name: String,
    pub handle: Handle,
    /// Parent communities; empty for a top-level community.
    #[serde(default)]
    pub parents: Vec<NodeId>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub logo: Option<NodeId>,
}

/// A collection of items, contained by one or more communities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: NodeId,
    pub name: String,
    pub handle: Handle,
    #[serde(default)]
    pub communities: Vec<NodeId>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub logo: Option<NodeId>,
}

/// An archived item and its content bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: NodeId,
    pub name: String,
    pub handle: Handle,
    #[serde(default)]
    pub owning_collection: Option<NodeId>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub bitstreams: Vec<Bitstream>,
    #[serde(default = "default_true")]
    pub archived: bool,
    #[serde(default)]
    pub withdrawn: bool,
}

fn default_true() -> bool {
    true
}

/// A resolved content object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentNode {
    Community(Community),
    Collection(Collection),
    Item(Item),
}

impl ContentNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Community(_) => NodeKind::Community,
            Self::Collection(_) => NodeKind::Collection,
            Self::Item(_) => NodeKind::Item,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::Community(c) => c.id,
            Self::Collection(c) => c.id,
            Self::Item(i) => i.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Community(c) => &c.name,
            Self::Collection(c) => &c.name,
            Self::Item(i) => &i.name,
        }
    }

    pub fn handle(&self) -> &Handle {
        match self {
            Self::Community(c) => &c.handle,
            Self::Collection(c) => &c.handle,
            Self::Item(i) => &i.handle,
        }
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Community(c) => &c.metadata,
            Self::Collection(c) => &c.metadata,
            Self::Item(i) => &i.metadata,
        }
    }

    /// Logo bitstream; items never carry one.
    pub fn logo(&self) -> Option<NodeId> {
        match self {
            Self::Community(c) => c.logo,
            Self::Collection(c) => c.logo,
            Self::Item(_) => None,
        }
    }

    /// The single parent followed by hierarchy walks: the first listed one.
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Self::Community(c) => c.parents.first().copied(),
            Self::Collection(c) => c.communities.first().copied(),
            Self::Item(i) => i.owning_collection,
        }
    }

    /// Look up a metadata value by key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata().get(key).map(String::as_str)
    }
}

impl From<Community> for ContentNode {
    fn from(c: Community) -> Self {
        Self::Community(c)
    }
}

impl From<Collection> for ContentNode {
    fn from(c: Collection) -> Self {
        Self::Collection(c)
    }
}

impl From<Item> for ContentNode {
    fn from(i: Item) -> Self {
        Self::Item(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn community(handle: &str, parents: Vec<NodeId>) -> Community {
        Community {
            id: NodeId::new(),
            name: "Root".into(),
            handle: Handle::parse(handle).unwrap(),
            parents,
            metadata: BTreeMap::new(),
            logo: None,
        }
    }

    #[test]
    fn node_ids_are_unique() {
        assert_ne!(NodeId::new(), NodeId::new());
    }

    #[test]
    fn node_id_parse_roundtrip() {
        let id = NodeId::new();
        let parsed: NodeId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<NodeId>().is_err());
    }

    #[test]
    fn parent_kinds() {
        assert_eq!(NodeKind::Community.parent_kind(), NodeKind::Community);
        assert_eq!(NodeKind::Collection.parent_kind(), NodeKind::Community);
        assert_eq!(NodeKind::Item.parent_kind(), NodeKind::Collection);
    }

    #[test]
    fn first_parent_wins() {
        let a = NodeId::new();
        let b = NodeId::new();
        let node = ContentNode::from(community("1/2", vec![a, b]));
        assert_eq!(node.parent(), Some(a));
        assert_eq!(node.kind(), NodeKind::Community);
    }

    #[test]
    fn top_level_has_no_parent() {
        let node = ContentNode::from(community("1/1", vec![]));
        assert_eq!(node.parent(), None);
    }

    #[test]
    fn json_carries_kind_tag() {
        let node = ContentNode::from(community("1/1", vec![]));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "community");
        assert_eq!(json["handle"], "1/1");
        let back: ContentNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn item_defaults() {
        let json = serde_json::json!({
            "id": NodeId::new(),
            "name": "Thesis",
            "handle": "10/abc",
        });
        let item: Item = serde_json::from_value(json).unwrap();
        assert!(item.archived);
        assert!(!item.withdrawn);
        assert!(item.bitstreams.is_empty());
        assert_eq!(item.owning_collection, None);
    }
}
