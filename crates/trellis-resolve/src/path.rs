//! Request path parsing.
//!
//! Object paths have one of two shapes:
//!
//! - `/handle/123/456`
//! - `/handle/123/456/extra/info`
//!
//! The identifier is exactly the two segments after the mount; anything after
//! the second slash is returned verbatim as `extra`. Query strings are split
//! off by the caller and never reach the parser.

use serde::{Deserialize, Serialize};

use trellis_types::Handle;

use crate::error::{ResolveError, ResolveResult};

/// Mount under which object pages live.
pub const HANDLE_MOUNT: &str = "/handle/";

/// An object reference extracted from a request path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPath {
    pub prefix: String,
    pub suffix: String,
    /// Path after the identifier, without its leading slash. May be empty.
    pub extra: String,
}

impl ObjectPath {
    /// The `prefix/suffix` identifier string.
    pub fn identifier(&self) -> String {
        format!("{}/{}", self.prefix, self.suffix)
    }

    pub fn handle(&self) -> ResolveResult<Handle> {
        Handle::new(self.prefix.as_str(), self.suffix.as_str())
            .map_err(|e| ResolveError::invalid_path(self.identifier(), e.to_string()))
    }
}

/// Splits request paths into [`ObjectPath`]s.
#[derive(Clone, Debug)]
pub struct PathParser {
    mount: String,
}

impl Default for PathParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PathParser {
    /// Parser for the standard `/handle/` mount.
    pub fn new() -> Self {
        Self::with_mount(HANDLE_MOUNT)
    }

    /// Parser for a different mount, given with or without its slashes.
    pub fn with_mount(mount: &str) -> Self {
        let trimmed = mount.trim_matches('/');
        Self {
            mount: format!("/{trimmed}/"),
        }
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Parse a raw request path.
    pub fn parse(&self, raw: &str) -> ResolveResult<ObjectPath> {
        let rest = raw.strip_prefix(self.mount.as_str()).ok_or_else(|| {
            ResolveError::invalid_path(raw, format!("expected a path under {}", self.mount))
        })?;

        let (prefix, after) = rest
            .split_once('/')
            .ok_or_else(|| ResolveError::invalid_path(raw, "identifier must be prefix/suffix"))?;
        let (suffix, extra) = after.split_once('/').unwrap_or((after, ""));

        if prefix.is_empty() || suffix.is_empty() {
            return Err(ResolveError::invalid_path(raw, "identifier segments must not be empty"));
        }

        Ok(ObjectPath {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            extra: extra.to_string(),
        })
    }
}
