//! Body/rule builder.
//!
//! Depth-first walk over a [`Node`] tree producing:
//!
//! 1. a literal-only JSON document with every matcher replaced by its example,
//! 2. a flat [`MatchingRules`] map keyed by the JSON-path of each matcher in
//!    that document.
//!
//! A matcher's own rule is recorded at the current path before its example
//! is descended, so a repeat wrapping an object yields a rule at the array
//! path plus rules for the element's matchers under one extra `[*]` segment.

use crate::error::DocumentError;
use crate::format::format_json_value;
use crate::matcher::Matcher;
use crate::node::Node;
use crate::path::JsonPath;
use crate::rule::{MatchingRule, MatchingRules};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// The generated fixture: example body plus matching rules.
///
/// Serializes as `{"body": ..., "matchingRules": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PactBody {
    pub body: Value,
    pub matching_rules: MatchingRules,
}

impl PactBody {
    pub fn to_json_value(&self) -> Result<Value, DocumentError> {
        serde_json::to_value(self).map_err(|error| DocumentError::Render(error.to_string()))
    }

    pub fn to_json_string_pretty(&self) -> Result<String, DocumentError> {
        format_json_value(&self.to_json_value()?)
    }
}

/// Walk `root` and produce its example document and matching rules.
pub fn build_body(root: &Node) -> PactBody {
    let mut walker = Walker::recording();
    let body = walker.walk(root, &JsonPath::root());
    let matching_rules = walker.rules;
    debug!(rules = matching_rules.len(), "built pact body");
    PactBody {
        body,
        matching_rules,
    }
}

/// The document for `node`, without collecting rules.
pub(crate) fn resolve_example(node: &Node) -> Value {
    Walker::example_only().walk(node, &JsonPath::root())
}

struct Walker {
    rules: MatchingRules,
    record: bool,
}

impl Walker {
    fn recording() -> Self {
        Self {
            rules: MatchingRules::new(),
            record: true,
        }
    }

    fn example_only() -> Self {
        Self {
            rules: MatchingRules::new(),
            record: false,
        }
    }

    fn walk(&mut self, node: &Node, path: &JsonPath) -> Value {
        match node {
            Node::Literal(value) => value.clone(),
            Node::Map(entries) => self.walk_fields(entries, path),
            Node::Seq(items) => {
                let item_path = path.all_items();
                Value::Array(items.iter().map(|item| self.walk(item, &item_path)).collect())
            }
            Node::Matcher(matcher) => {
                self.record_rule(path, matcher.matching_rule());
                self.walk_matcher(matcher, path)
            }
        }
    }

    fn walk_fields(&mut self, entries: &BTreeMap<String, Node>, path: &JsonPath) -> Value {
        let object = entries
            .iter()
            .map(|(key, value)| (key.clone(), self.walk(value, &path.field(key))))
            .collect::<Map<String, Value>>();
        Value::Object(object)
    }

    fn walk_matcher(&mut self, matcher: &Matcher, path: &JsonPath) -> Value {
        match matcher {
            Matcher::Like(contents) => self.walk(contents, path),
            Matcher::Regex { example, .. } => Value::String(example.clone()),
            Matcher::RawString(value) => Value::String(value.clone()),
            Matcher::Object(fields) => self.walk_fields(fields, path),
            Matcher::EachLike { contents, .. } => {
                let element = self.walk(contents, &path.all_items());
                let copies = matcher.repeat_count().unwrap_or_default();
                Value::Array(vec![element; copies])
            }
        }
    }

    fn record_rule(&mut self, path: &JsonPath, rule: MatchingRule) {
        if !self.record {
            return;
        }
        trace!(path = %path, kind = ?rule.kind, "matching rule recorded");
        if let Some(previous) = self.rules.insert(path.as_str(), rule.clone())
            && previous != rule
        {
            warn!(
                path = %path,
                previous = ?previous,
                replacement = ?rule,
                "matching rule path collision; keeping the later rule"
            );
        }
    }
}
