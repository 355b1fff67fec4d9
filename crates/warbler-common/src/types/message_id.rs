//! Opaque message identifiers.

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, ToSmolStr};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Identifier of a message, as rendered into the page by the server.
///
/// The value is never validated or escaped. It is carried verbatim from the
/// icon's data attribute into the request path, and may be empty when the
/// attribute was missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MessageId(SmolStr);

impl MessageId {
    /// Wraps the given token as-is.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id.as_ref()))
    }

    /// Identifier used when the element carries no id attribute.
    pub fn missing() -> Self {
        Self(SmolStr::default())
    }

    /// Builds an id from an attribute lookup, falling back to [`MessageId::missing`].
    pub fn from_attribute(value: Option<impl AsRef<str>>) -> Self {
        value.map(Self::new).unwrap_or_else(Self::missing)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty.
    pub fn is_missing(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for MessageId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value.to_smolstr())
    }
}

impl From<i64> for MessageId {
    fn from(value: i64) -> Self {
        Self(value.to_smolstr())
    }
}

impl Deref for MessageId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
