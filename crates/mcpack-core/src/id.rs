use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between namespace and local id in a qualified id.
pub const SEPARATOR: char = ':';

/// The game's built-in namespace. Ids in it never need a catalog lookup.
pub const BUILTIN_NAMESPACE: &str = "minecraft";

/// A fully-qualified item id, `namespace:local`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId {
    pub namespace: String,
    pub local: String,
}

impl ItemId {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Split a qualified id at the first separator. Returns `None` when the
    /// string carries no namespace.
    pub fn parse(qualified: &str) -> Option<Self> {
        qualified
            .split_once(SEPARATOR)
            .map(|(namespace, local)| Self::new(namespace, local))
    }

    /// Whether `id` already carries a namespace.
    pub fn is_qualified(id: &str) -> bool {
        id.contains(SEPARATOR)
    }

    pub fn is_builtin(&self) -> bool {
        self.namespace == BUILTIN_NAMESPACE
    }

    /// The qualified form when `qualify` is set, otherwise the bare local id.
    pub fn render(&self, qualify: bool) -> String {
        if qualify {
            self.to_string()
        } else {
            self.local.clone()
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.namespace, self.local)
    }
}

/// Returned when a string lacks the `namespace:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a qualified id (expected namespace:id)")]
pub struct UnqualifiedId(pub String);

impl FromStr for ItemId {
    type Err = UnqualifiedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnqualifiedId(s.to_string()))
    }
}

impl TryFrom<String> for ItemId {
    type Error = UnqualifiedId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.to_string()
    }
}
