//! Theme resolution over the breadcrumb trail.
//!
//! Each non-root crumb path maps to a configuration key by replacing `/`
//! with `.` and prepending the theme setting, so a theme on
//! `/handle/1234/5678` is configured as
//!
//! ```text
//! theme.handle.1234.5678 = mytheme
//! ```
//!
//! Crumbs are visited root to leaf and every hit overwrites the running
//! result: the deepest configured node wins, and children inherit their
//! ancestors' theme otherwise.

use tracing::debug;

use crate::breadcrumb::BreadcrumbEntry;
use crate::config_store::ThemeConfigStore;

/// Configuration key of the default theme, and prefix of per-path overrides.
pub const THEME_SETTING: &str = "theme";

/// Name used when neither an override nor a default theme is configured.
pub const FALLBACK_THEME: &str = "default";

/// Picks the effective theme for a trail.
#[derive(Clone, Debug)]
pub struct ThemeResolver<C> {
    config: C,
    setting: String,
}

impl<C: ThemeConfigStore> ThemeResolver<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            setting: THEME_SETTING.to_string(),
        }
    }

    /// Use a different setting namespace, e.g. `dspace.theme`.
    pub fn with_setting(mut self, setting: impl Into<String>) -> Self {
        self.setting = setting.into();
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Configuration key for a crumb path; `None` for the root and empty paths.
    pub fn config_key(&self, path: &str) -> Option<String> {
        if path.trim().is_empty() || path == "/" {
            return None;
        }
        Some(format!("{}{}", self.setting, path.replace('/', ".")))
    }

    /// The default theme: the store's own setting first, then `fallback`.
    ///
    /// Returns an empty string when neither is set; [`resolve`](Self::resolve)
    /// turns that into [`FALLBACK_THEME`].
    pub fn effective_default(&self, fallback: Option<&str>) -> String {
        self.config
            .get(&self.setting)
            .filter(|theme| !theme.trim().is_empty())
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_default()
    }

    /// Resolve the theme for a root-to-leaf trail.
    pub fn resolve(&self, breadcrumbs: &[BreadcrumbEntry], default_theme: &str) -> String {
        let mut theme: Option<String> = None;
        for crumb in breadcrumbs.iter().filter(|c| !c.is_root()) {
            let Some(key) = self.config_key(&crumb.path) else {
                continue;
            };
            if let Some(configured) = self.config.get(&key).filter(|v| !v.is_empty()) {
                debug!(%key, theme = %configured, "theme override matched");
                theme = Some(configured);
            }
        }

        theme
            .filter(|t| !t.trim().is_empty())
            .or_else(|| Some(default_theme.to_string()).filter(|t| !t.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_THEME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_store::MapConfigStore;

    fn trail() -> Vec<BreadcrumbEntry> {
        vec![
            BreadcrumbEntry::new("App Home", "/"),
            BreadcrumbEntry::new("CommunityA", "/handle/1/1"),
            BreadcrumbEntry::new("CollectionB", "/handle/1/2"),
        ]
    }

    fn store(entries: &[(&str, &str)]) -> MapConfigStore {
        entries.iter().copied().collect()
    }

    #[test]
    fn inherited_from_ancestor() {
        let resolver = ThemeResolver::new(store(&[("theme.handle.1.1", "alpha")]));
        assert_eq!(resolver.resolve(&trail(), ""), "alpha");
    }

    #[test]
    fn deepest_override_wins() {
        let resolver = ThemeResolver::new(store(&[
            ("theme.handle.1.1", "alpha"),
            ("theme.handle.1.2", "beta"),
        ]));
        assert_eq!(resolver.resolve(&trail(), ""), "beta");
    }

    #[test]
    fn no_match_blank_default() {
        let resolver = ThemeResolver::new(MapConfigStore::new());
        assert_eq!(resolver.resolve(&trail(), ""), "default");
        assert_eq!(resolver.resolve(&trail(), "   "), "default");
    }

    #[test]
    fn no_match_uses_default() {
        let resolver = ThemeResolver::new(MapConfigStore::new());
        assert_eq!(resolver.resolve(&trail(), "classic"), "classic");
    }

    #[test]
    fn empty_override_is_ignored() {
        let resolver = ThemeResolver::new(store(&[
            ("theme.handle.1.1", "alpha"),
            ("theme.handle.1.2", ""),
        ]));
        assert_eq!(resolver.resolve(&trail(), ""), "alpha");
    }

    #[test]
    fn root_crumb_is_skipped() {
        let resolver = ThemeResolver::new(store(&[("theme.", "never")]));
        assert_eq!(resolver.resolve(&trail(), "x"), "x");
        assert_eq!(resolver.config_key("/"), None);
        assert_eq!(resolver.config_key(""), None);
    }

    #[test]
    fn residual_segment_override() {
        let mut crumbs = trail();
        crumbs.push(BreadcrumbEntry::new("Edit", "edit"));
        let resolver = ThemeResolver::new(store(&[
            ("theme.handle.1.1", "alpha"),
            ("themeedit", "editor"),
        ]));
        assert_eq!(resolver.resolve(&crumbs, ""), "editor");
    }

    #[test]
    fn key_format() {
        let resolver = ThemeResolver::new(MapConfigStore::new());
        assert_eq!(resolver.config_key("/handle/1234/5678").as_deref(), Some("theme.handle.1234.5678"));
    }

    #[test]
    fn custom_setting_namespace() {
        let resolver = ThemeResolver::new(store(&[("dspace.theme.handle.1.1", "mirage")]))
            .with_setting("dspace.theme");
        assert_eq!(resolver.resolve(&trail(), ""), "mirage");
    }

    #[test]
    fn effective_default_order() {
        let configured = ThemeResolver::new(store(&[("theme", "classic")]));
        assert_eq!(configured.effective_default(Some("server")), "classic");

        let blank = ThemeResolver::new(store(&[("theme", " ")]));
        assert_eq!(blank.effective_default(Some("server")), "server");

        let none = ThemeResolver::new(MapConfigStore::new());
        assert_eq!(none.effective_default(None), "");
        assert_eq!(none.resolve(&trail(), &none.effective_default(None)), "default");
    }
}
