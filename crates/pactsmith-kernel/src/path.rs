//! JSON-path addressing for matching rules.
//!
//! Paths start at the body root and grow one segment per traversal step:
//!
//! ```text
//! $.body              document root
//! $.body.users        object field
//! $.body.users[*]     any element of the sequence at `users`
//! ```
//!
//! Sequence elements are always addressed by the `[*]` wildcard, never by a
//! concrete index: repeated elements are matched structurally.

use std::fmt;

/// Path of the document root.
pub const BODY_ROOT: &str = "$.body";

/// Wildcard segment addressing every element of a sequence.
pub const ALL_ITEMS: &str = "[*]";

/// An immutable JSON-path. Each step returns a new, longer path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonPath(String);

impl JsonPath {
    /// The `$.body` root.
    pub fn root() -> Self {
        Self(BODY_ROOT.to_string())
    }

    /// Append a `.name` field segment.
    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    /// Append the `[*]` wildcard segment.
    pub fn all_items(&self) -> Self {
        Self(format!("{}{ALL_ITEMS}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == BODY_ROOT
    }
}

impl Default for JsonPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
