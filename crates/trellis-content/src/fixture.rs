//! TOML fixture files describing a content hierarchy.
//!
//! ```toml
//! [[community]]
//! id = "0190a0b4-0000-7000-8000-000000000001"
//! name = "Research"
//! handle = "10/root"
//!
//! [[collection]]
//! id = "0190a0b4-0000-7000-8000-000000000002"
//! name = "Theses"
//! handle = "10/xyz"
//! communities = ["0190a0b4-0000-7000-8000-000000000001"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use trellis_types::{Collection, Community, ContentNode, Item, NodeId};

use crate::error::ContentResult;
use crate::memory::InMemoryContentSource;

/// Parsed contents of a fixture file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContentFixture {
    #[serde(default)]
    pub community: Vec<Community>,
    #[serde(default)]
    pub collection: Vec<Collection>,
    #[serde(default)]
    pub item: Vec<Item>,
}

impl ContentFixture {
    pub fn from_toml_str(s: &str) -> ContentResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ContentResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Total number of objects in the fixture.
    pub fn len(&self) -> usize {
        self.community.len() + self.collection.len() + self.item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load every object into a fresh [`InMemoryContentSource`].
    ///
    /// Parent references that point outside the fixture are kept as-is and
    /// logged; hierarchy walks truncate at them.
    pub fn into_source(self) -> ContentResult<InMemoryContentSource> {
        let known: HashSet<NodeId> = self
            .community
            .iter()
            .map(|c| c.id)
            .chain(self.collection.iter().map(|c| c.id))
            .chain(self.item.iter().map(|i| i.id))
            .collect();

        let source = InMemoryContentSource::new();
        let nodes = self
            .community
            .into_iter()
            .map(ContentNode::from)
            .chain(self.collection.into_iter().map(ContentNode::from))
            .chain(self.item.into_iter().map(ContentNode::from));

        for node in nodes {
            if let Some(parent) = node.parent() {
                if !known.contains(&parent) {
                    warn!(handle = %node.handle(), %parent, "fixture node has a dangling parent");
                }
            }
            source.insert(node)?;
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use crate::traits::ContentSource;
    use std::io::Write;
    use trellis_types::Handle;

    const FIXTURE: &str = r#"
[[community]]
id = "0190a0b4-0000-7000-8000-000000000001"
name = "RootCommunityName"
handle = "10/root"
metadata = { introductory_text = "Welcome" }

[[collection]]
id = "0190a0b4-0000-7000-8000-000000000002"
name = "CollectionName"
handle = "10/xyz"
communities = ["0190a0b4-0000-7000-8000-000000000001"]

[[item]]
id = "0190a0b4-0000-7000-8000-000000000003"
name = "ItemName"
handle = "10/abc"
owning_collection = "0190a0b4-0000-7000-8000-000000000002"

[[item.bitstreams]]
id = "0190a0b4-0000-7000-8000-000000000004"
name = "report.pdf"
size_bytes = 2048
mime_type = "application/pdf"
"#;

    #[test]
    fn parse_fixture() {
        let fixture = ContentFixture::from_toml_str(FIXTURE).unwrap();
        assert_eq!(fixture.len(), 3);
        assert_eq!(fixture.item[0].bitstreams[0].name, "report.pdf");
        assert_eq!(
            fixture.community[0].metadata.get("introductory_text").map(String::as_str),
            Some("Welcome")
        );
    }

    #[test]
    fn fixture_into_source() {
        let source = ContentFixture::from_toml_str(FIXTURE).unwrap().into_source().unwrap();
        assert_eq!(source.len().unwrap(), 3);
        let item = source.resolve_handle(&Handle::parse("10/abc").unwrap()).unwrap().unwrap();
        assert_eq!(item.name(), "ItemName");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let fixture = ContentFixture::load(file.path()).unwrap();
        assert_eq!(fixture.collection[0].name, "CollectionName");
    }

    #[test]
    fn bad_handle_fails_to_parse() {
        let raw = r#"
[[community]]
id = "0190a0b4-0000-7000-8000-000000000001"
name = "Broken"
handle = "no-slash"
"#;
        assert!(matches!(ContentFixture::from_toml_str(raw), Err(ContentError::Parse(_))));
    }

    #[test]
    fn duplicate_handles_rejected() {
        let raw = r#"
[[community]]
id = "0190a0b4-0000-7000-8000-000000000001"
name = "A"
handle = "1/1"

[[community]]
id = "0190a0b4-0000-7000-8000-000000000002"
name = "B"
handle = "1/1"
"#;
        let err = ContentFixture::from_toml_str(raw).unwrap().into_source().unwrap_err();
        assert!(matches!(err, ContentError::Duplicate { .. }));
    }
}
