//! Hierarchical presentation for Trellis.
//!
//! Given a resolved object and its ancestor chain, this crate computes what
//! a page needs besides the object itself: the breadcrumb trail, the theme
//! selected by the object's position in the hierarchy, and the assembled
//! [`PageContext`] handed to rendering.
//!
//! Nothing here fails: missing configuration means "inherit or default",
//! and failed lookups degrade to shorter trails or empty listings.

pub mod breadcrumb;
pub mod config_store;
pub mod page;
pub mod theme;

pub use breadcrumb::{humanize_segment, residual_path, BreadcrumbBuilder, BreadcrumbEntry};
pub use config_store::{MapConfigStore, ThemeConfigStore};
pub use page::{NodeSummary, PageBuilder, PageContext, PageDetails, Paged, View, DEFAULT_PAGE_SIZE};
pub use theme::{ThemeResolver, FALLBACK_THEME, THEME_SETTING};
