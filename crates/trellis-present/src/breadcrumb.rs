//! Breadcrumb trails.
//!
//! A trail is built from two parts, in this order:
//!
//! 1. One crumb per node of the ancestor chain, linking to `/handle/{handle}`.
//! 2. One crumb per segment of the residual path (whatever follows the object
//!    in the request path), labelled in title case.
//!
//! A synthetic `"{root label} Home"` crumb pointing at `/` is always first.
//! No sorting or deduplication is applied.

use serde::{Deserialize, Serialize};

use trellis_resolve::HANDLE_MOUNT;
use trellis_types::ContentNode;

/// One (label, path) pair of a breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    pub label: String,
    pub path: String,
}

impl BreadcrumbEntry {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// Whether this is the synthetic root crumb.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}

/// Builds breadcrumb trails under a fixed application name.
#[derive(Clone, Debug)]
pub struct BreadcrumbBuilder {
    root_label: String,
}

impl BreadcrumbBuilder {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
        }
    }

    /// The synthetic first crumb.
    pub fn root(&self) -> BreadcrumbEntry {
        BreadcrumbEntry::new(format!("{} Home", self.root_label), "/")
    }

    /// Build the trail for a root-first ancestor chain and a residual path.
    pub fn build(&self, chain: &[ContentNode], residual: &str) -> Vec<BreadcrumbEntry> {
        let mut crumbs = Vec::with_capacity(chain.len() + 1);
        crumbs.push(self.root());

        crumbs.extend(
            chain
                .iter()
                .map(|node| BreadcrumbEntry::new(node.name(), format!("{HANDLE_MOUNT}{}", node.handle()))),
        );

        crumbs.extend(
            residual
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| BreadcrumbEntry::new(humanize_segment(segment), segment)),
        );

        crumbs
    }
}

/// Turn a path segment into a label: dashes become spaces and every word
/// starts with an uppercase letter. The rest of each word is left as-is.
pub fn humanize_segment(segment: &str) -> String {
    let spaced = segment.replace('-', " ");
    let mut label = String::with_capacity(spaced.len());
    let mut word_start = true;
    for ch in spaced.chars() {
        if ch.is_whitespace() {
            word_start = true;
            label.push(ch);
        } else if word_start {
            label.extend(ch.to_uppercase());
            word_start = false;
        } else {
            label.push(ch);
        }
    }
    label
}

/// What remains of `request_path` after the object it refers to.
///
/// Everything up to and including the node's surrogate ID is dropped, then
/// everything up to and including its handle, and finally a leading slash.
/// Without a node the whole path (minus its leading slash) is residual.
pub fn residual_path(request_path: &str, node: Option<&ContentNode>) -> String {
    let mut path = request_path;
    if let Some(node) = node {
        for marker in [node.id().to_string(), node.handle().to_string()] {
            if let Some(pos) = path.find(&marker) {
                path = &path[pos + marker.len()..];
            }
        }
    }
    path.strip_prefix('/').unwrap_or(path).to_string()
}
