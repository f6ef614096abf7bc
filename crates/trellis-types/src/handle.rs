use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A persistent identifier of the form `prefix/suffix`.
///
/// Both segments are non-empty and contain no `/`. A handle is immutable
/// once parsed and serializes as its string form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle {
    prefix: String,
    suffix: String,
}

impl Handle {
    /// Build a handle from its two segments.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Result<Self, TypeError> {
        let prefix = prefix.into();
        let suffix = suffix.into();
        validate_segment(&prefix, &suffix, &prefix)?;
        validate_segment(&prefix, &suffix, &suffix)?;
        Ok(Self { prefix, suffix })
    }

    /// Parse `prefix/suffix`.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let (prefix, suffix) = s.split_once('/').ok_or_else(|| TypeError::InvalidHandle {
            value: s.to_string(),
            reason: "expected prefix/suffix".into(),
        })?;
        Self::new(prefix, suffix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

fn validate_segment(prefix: &str, suffix: &str, segment: &str) -> Result<(), TypeError> {
    let reason = if segment.is_empty() {
        "handle segments must not be empty"
    } else if segment.contains('/') {
        "handle segments must not contain '/'"
    } else if segment.chars().any(char::is_whitespace) {
        "handle segments must not contain whitespace"
    } else {
        return Ok(());
    };
    Err(TypeError::InvalidHandle {
        value: format!("{prefix}/{suffix}"),
        reason: reason.into(),
    })
}

impl FromStr for Handle {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Handle {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.to_string()
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}/{})", self.prefix, self.suffix)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.prefix, self.suffix)
    }
}
