//! The tree the body builder walks.
//!
//! A fixture is described by a [`Node`] tree: plain JSON literals, mappings
//! and sequences, with [`Matcher`]s in any value position.

use crate::body;
use crate::matcher::Matcher;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal value; emitted as-is with no rule.
    Literal(Value),

    /// A mapping whose values may be literals, matchers, maps or sequences.
    Map(BTreeMap<String, Node>),

    /// A plain sequence; elements are addressed with `[*]`.
    Seq(Vec<Node>),

    /// A matcher in value position.
    Matcher(Matcher),
}

impl Node {
    /// Build a mapping node from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a plain sequence node.
    pub fn seq<V, I>(items: I) -> Self
    where
        V: Into<Node>,
        I: IntoIterator<Item = V>,
    {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn null() -> Self {
        Self::Literal(Value::Null)
    }

    pub fn is_matcher(&self) -> bool {
        matches!(self, Self::Matcher(_))
    }

    /// The literal-only document this node resolves to.
    pub fn example(&self) -> Value {
        body::resolve_example(self)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.example().serialize(serializer)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Matcher> for Node {
    fn from(matcher: Matcher) -> Self {
        Self::Matcher(matcher)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Literal(Value::String(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Seq(items)
    }
}

impl From<BTreeMap<String, Node>> for Node {
    fn from(entries: BTreeMap<String, Node>) -> Self {
        Self::Map(entries)
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);
