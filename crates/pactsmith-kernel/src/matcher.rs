//! The closed set of matcher variants.
//!
//! Every variant answers three questions deterministically:
//!
//! - its example value ([`Matcher::value`] / [`Matcher::example`]),
//! - its class ([`Matcher::class`], for introspection only),
//! - its matching rule ([`Matcher::matching_rule`]).
//!
//! New matcher kinds are added here as explicit variants.

use crate::body;
use crate::node::Node;
use crate::rule::MatchingRule;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Match by type against the wrapped example.
    Like(Box<Node>),

    /// Match a string against a regular expression.
    Regex { example: String, pattern: String },

    /// A sequence of elements shaped like `contents`.
    ///
    /// `0` means the bound is not set. When `max` is set it takes precedence
    /// over `min` for both the class and the emitted rule.
    EachLike {
        contents: Box<Node>,
        min: usize,
        max: usize,
    },

    /// A plain string standing in matcher position.
    RawString(String),

    /// A field map whose values may themselves be matchers.
    Object(BTreeMap<String, Node>),
}

/// Introspection tag for a matcher variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherClass {
    Like,
    Regex,
    ArrayMinLike,
    ArrayMaxLike,
    RawString,
    Object,
}

impl fmt::Display for MatcherClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Like => "like",
            Self::Regex => "regex",
            Self::ArrayMinLike => "array_min_like",
            Self::ArrayMaxLike => "array_max_like",
            Self::RawString => "raw_string",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

impl Matcher {
    /// The raw generated value, without any matching context.
    ///
    /// For `EachLike` this is a single element template, not the expanded
    /// sequence.
    pub fn value(&self) -> Node {
        match self {
            Self::Like(contents) => contents.as_ref().clone(),
            Self::Regex { example, .. } => Node::from(example.as_str()),
            Self::EachLike { contents, .. } => contents.as_ref().clone(),
            Self::RawString(value) => Node::from(value.as_str()),
            Self::Object(fields) => Node::Map(fields.clone()),
        }
    }

    /// The literal placeholder this matcher contributes to the document.
    pub fn example(&self) -> Value {
        body::resolve_example(&Node::Matcher(self.clone()))
    }

    pub fn class(&self) -> MatcherClass {
        match self {
            Self::Like(_) => MatcherClass::Like,
            Self::Regex { .. } => MatcherClass::Regex,
            Self::EachLike { max, .. } if *max != 0 => MatcherClass::ArrayMaxLike,
            Self::EachLike { .. } => MatcherClass::ArrayMinLike,
            Self::RawString(_) => MatcherClass::RawString,
            Self::Object(_) => MatcherClass::Object,
        }
    }

    pub fn matching_rule(&self) -> MatchingRule {
        match self {
            Self::Like(_) | Self::RawString(_) | Self::Object(_) => MatchingRule::by_type(),
            Self::Regex { pattern, .. } => MatchingRule::by_regex(pattern.as_str()),
            Self::EachLike { max, .. } if *max != 0 => MatchingRule::by_type().with_max(*max),
            Self::EachLike { min, .. } => MatchingRule::by_type().with_min(*min),
        }
    }

    /// How many element copies the body builder materializes.
    ///
    /// A min-bounded repeat yields exactly `min` copies. A max-bounded repeat
    /// yields `max(min, 1)` copies, never more than `max`.
    pub fn repeat_count(&self) -> Option<usize> {
        match self {
            Self::EachLike { min, max, .. } if *max != 0 => Some((*min).max(1).min(*max)),
            Self::EachLike { min, .. } => Some(*min),
            _ => None,
        }
    }

    /// Set the minimum bound of an `EachLike`. Other variants are returned unchanged.
    pub fn with_min(self, bound: usize) -> Self {
        match self {
            Self::EachLike { contents, max, .. } => Self::EachLike {
                contents,
                min: bound,
                max,
            },
            other => other,
        }
    }

    /// Set the maximum bound of an `EachLike`. Other variants are returned unchanged.
    pub fn with_max(self, bound: usize) -> Self {
        match self {
            Self::EachLike { contents, min, .. } => Self::EachLike {
                contents,
                min,
                max: bound,
            },
            other => other,
        }
    }
}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.example().serialize(serializer)
    }
}
