//! Page contexts: everything a view needs besides the template itself.
//!
//! A [`PageBuilder`] combines the ancestor walk, the breadcrumb trail, and
//! theme resolution for one request, then adds kind-specific details
//! (container blurbs, paginated item listings, an item's files).

use serde::{Deserialize, Serialize};
use tracing::warn;

use trellis_content::ContentSource;
use trellis_resolve::{Action, HierarchyWalker, HANDLE_MOUNT};
use trellis_types::{Bitstream, ContentNode, Handle, NodeId, NodeKind};

use crate::breadcrumb::{residual_path, BreadcrumbBuilder, BreadcrumbEntry};
use crate::config_store::ThemeConfigStore;
use crate::theme::ThemeResolver;

/// Items listed per collection page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Template a page context is destined for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    Community,
    CommunityEdit,
    Collection,
    CollectionEdit,
    Item,
    ItemEdit,
    Error,
}

impl View {
    pub fn for_node(kind: NodeKind, action: Action) -> Self {
        match (kind, action) {
            (NodeKind::Community, Action::View) => Self::Community,
            (NodeKind::Community, Action::Edit) => Self::CommunityEdit,
            (NodeKind::Collection, Action::View) => Self::Collection,
            (NodeKind::Collection, Action::Edit) => Self::CollectionEdit,
            (NodeKind::Item, Action::View) => Self::Item,
            (NodeKind::Item, Action::Edit) => Self::ItemEdit,
        }
    }
}

/// Compact description of a node for listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub handle: Handle,
    pub link: String,
}

impl From<&ContentNode> for NodeSummary {
    fn from(node: &ContentNode) -> Self {
        Self {
            id: node.id(),
            kind: node.kind(),
            name: node.name().to_string(),
            handle: node.handle().clone(),
            link: format!("{HANDLE_MOUNT}{}", node.handle()),
        }
    }
}

/// One page of a longer list.
///
/// Pages are zero-based; a requested page past the end is clamped to the
/// last page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total: usize,
}

impl<T> Paged<T> {
    pub fn new(all: Vec<T>, page_size: usize, requested: usize) -> Self {
        let page_size = page_size.max(1);
        let total = all.len();
        let page_count = total.div_ceil(page_size).max(1);
        let page = requested.min(page_count - 1);
        let items = all
            .into_iter()
            .skip(page * page_size)
            .take(page_size)
            .collect();
        Self {
            items,
            page,
            page_count,
            page_size,
            total,
        }
    }
}

/// Kind-specific page content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageDetails {
    Home {
        communities: Vec<NodeSummary>,
    },
    Community {
        intro: Option<String>,
        copyright: Option<String>,
        news: Option<String>,
        logo: Option<String>,
    },
    Collection {
        intro: Option<String>,
        copyright: Option<String>,
        news: Option<String>,
        logo: Option<String>,
        items: Paged<NodeSummary>,
    },
    Item {
        bitstreams: Vec<Bitstream>,
        archived: bool,
        withdrawn: bool,
    },
    Edit {
        metadata: Vec<(String, String)>,
    },
    Error {
        message: String,
    },
}

/// Everything handed to rendering for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub view: View,
    pub application_name: String,
    pub theme: String,
    pub breadcrumbs: Vec<BreadcrumbEntry>,
    pub node: Option<ContentNode>,
    pub details: PageDetails,
}

fn logo_path(id: NodeId) -> String {
    format!("/retrieve/{id}")
}

/// Assembles [`PageContext`]s from a content source and theme configuration.
pub struct PageBuilder<'a, S: ?Sized, C> {
    source: &'a S,
    themes: &'a ThemeResolver<C>,
    crumbs: BreadcrumbBuilder,
    application_name: String,
    default_theme: String,
    page_size: usize,
}

impl<'a, S: ContentSource + ?Sized, C: ThemeConfigStore> PageBuilder<'a, S, C> {
    pub fn new(source: &'a S, themes: &'a ThemeResolver<C>, application_name: impl Into<String>) -> Self {
        let application_name = application_name.into();
        Self {
            source,
            themes,
            crumbs: BreadcrumbBuilder::new(application_name.clone()),
            default_theme: themes.effective_default(None),
            application_name,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Default theme used when the store has no `theme` setting of its own.
    pub fn with_default_theme(mut self, fallback: &str) -> Self {
        self.default_theme = self.themes.effective_default(Some(fallback));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Breadcrumbs for a node reached through `request_path`.
    pub fn breadcrumbs(&self, node: Option<&ContentNode>, request_path: &str) -> Vec<BreadcrumbEntry> {
        let chain = node
            .map(|n| HierarchyWalker::new(self.source).ancestors(n))
            .unwrap_or_default();
        self.crumbs.build(&chain, &residual_path(request_path, node))
    }

    pub fn theme(&self, breadcrumbs: &[BreadcrumbEntry]) -> String {
        self.themes.resolve(breadcrumbs, &self.default_theme)
    }

    /// Home page: the top-level communities.
    pub fn home(&self) -> PageContext {
        let communities = self
            .source
            .top_communities()
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not list top-level communities");
                Vec::new()
            })
            .iter()
            .map(NodeSummary::from)
            .collect();
        self.context(View::Home, None, "/", PageDetails::Home { communities })
    }

    /// Page for a resolved node. `page` selects the collection listing page.
    pub fn object(&self, node: ContentNode, action: Action, request_path: &str, page: usize) -> PageContext {
        let view = View::for_node(node.kind(), action);
        let details = match action {
            Action::Edit => PageDetails::Edit {
                metadata: node
                    .metadata()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            },
            Action::View => self.details(&node, page),
        };
        self.context(view, Some(node), request_path, details)
    }

    /// Themed error page. Only the root crumb is shown.
    pub fn error(&self, message: impl Into<String>) -> PageContext {
        let details = PageDetails::Error {
            message: message.into(),
        };
        self.context(View::Error, None, "", details)
    }

    fn context(&self, view: View, node: Option<ContentNode>, request_path: &str, details: PageDetails) -> PageContext {
        let breadcrumbs = self.breadcrumbs(node.as_ref(), request_path);
        let theme = self.theme(&breadcrumbs);
        PageContext {
            view,
            application_name: self.application_name.clone(),
            theme,
            breadcrumbs,
            node,
            details,
        }
    }

    fn details(&self, node: &ContentNode, page: usize) -> PageDetails {
        let blurb = |key: &str| node.metadata_value(key).map(str::to_string);
        match node {
            ContentNode::Community(_) => PageDetails::Community {
                intro: blurb("introductory_text"),
                copyright: blurb("copyright_text"),
                news: blurb("side_bar_text"),
                logo: node.logo().map(logo_path),
            },
            ContentNode::Collection(c) => {
                let items = self.source.items_in_collection(&c.id).unwrap_or_else(|e| {
                    warn!(collection = %c.handle, error = %e, "could not list collection items");
                    Vec::new()
                });
                let summaries = items.iter().map(NodeSummary::from).collect();
                PageDetails::Collection {
                    intro: blurb("introductory_text"),
                    copyright: blurb("copyright_text"),
                    news: blurb("side_bar_text"),
                    logo: node.logo().map(logo_path),
                    items: Paged::new(summaries, self.page_size, page),
                }
            }
            ContentNode::Item(i) => PageDetails::Item {
                bitstreams: i.bitstreams.clone(),
                archived: i.archived,
                withdrawn: i.withdrawn,
            },
        }
    }
}
