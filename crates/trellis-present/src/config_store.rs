//! Flat key/value access to theme configuration.

use std::collections::BTreeMap;

/// Read-only, flat string configuration.
///
/// The store does no pattern matching: all prefix logic lives in
/// [`ThemeResolver`](crate::ThemeResolver). A missing key is `None`, never an error.
pub trait ThemeConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: ThemeConfigStore + ?Sized> ThemeConfigStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: ThemeConfigStore + ?Sized> ThemeConfigStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// A [`ThemeConfigStore`] backed by an ordered map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapConfigStore {
    entries: BTreeMap<String, String>,
}

impl MapConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose key starts with `prefix`, in key order.
    pub fn entries_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries
            .range(prefix.to_string()..)
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for MapConfigStore {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapConfigStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl ThemeConfigStore for MapConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
