use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use trellis_present::{MapConfigStore, DEFAULT_PAGE_SIZE, THEME_SETTING};

use crate::error::{ServerError, ServerResult};

/// Server settings, usually read from a TOML file.
///
/// ```toml
/// bind_addr = "0.0.0.0:8080"
/// application_name = "Research Archive"
/// default_theme = "classic"
/// theme_setting = "theme"
/// content_fixture = "content.toml"
///
/// [properties]
/// "theme.handle.10.xyz" = "alpha"
/// ```
///
/// `[properties]` is the flat configuration namespace theme lookups read
/// from. Nested tables are flattened into dotted keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub application_name: String,
    /// Used when `properties` has no `theme` setting of its own.
    pub default_theme: String,
    /// Property that holds the default theme and prefixes per-path overrides.
    pub theme_setting: String,
    pub content_fixture: Option<PathBuf>,
    pub page_size: usize,
    pub properties: toml::Table,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            application_name: "Trellis".into(),
            default_theme: String::new(),
            theme_setting: THEME_SETTING.into(),
            content_fixture: None,
            page_size: DEFAULT_PAGE_SIZE,
            properties: toml::Table::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load from a file. A relative `content_fixture` is resolved against
    /// the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&raw)?;
        if let (Some(fixture), Some(dir)) = (config.content_fixture.as_ref(), path.parent()) {
            if fixture.is_relative() {
                config.content_fixture = Some(dir.join(fixture));
            }
        }
        Ok(config)
    }

    /// The flattened `[properties]` namespace.
    pub fn theme_store(&self) -> MapConfigStore {
        let mut store = MapConfigStore::new();
        flatten_into(&mut store, "", &self.properties);
        store
    }
}

fn flatten_into(store: &mut MapConfigStore, prefix: &str, table: &toml::Table) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten_into(store, &full, nested),
            toml::Value::String(s) => {
                store.insert(full, s.clone());
            }
            other => {
                store.insert(full, other.to_string());
            }
        }
    }
}
