//! Matching rules: how a verifier compares actual data at one path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Comparison criterion of a matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Actual value must have the same JSON type as the example.
    Type,
    /// Actual value must be a string matching the attached pattern.
    Regex,
}

/// A single matching rule, e.g. `{"match": "type", "min": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingRule {
    #[serde(rename = "match")]
    pub kind: MatchKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl MatchingRule {
    /// `{"match": "type"}`
    pub fn by_type() -> Self {
        Self {
            kind: MatchKind::Type,
            min: None,
            max: None,
            regex: None,
        }
    }

    /// `{"match": "regex", "regex": <pattern>}`
    pub fn by_regex(pattern: impl Into<String>) -> Self {
        Self {
            kind: MatchKind::Regex,
            min: None,
            max: None,
            regex: Some(pattern.into()),
        }
    }

    pub fn with_min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

/// Flat mapping from JSON-path to matching rule.
///
/// Keys are unique and iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchingRules(BTreeMap<String, MatchingRule>);

impl MatchingRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, returning the rule previously stored at `path`.
    pub fn insert(&mut self, path: impl Into<String>, rule: MatchingRule) -> Option<MatchingRule> {
        self.0.insert(path.into(), rule)
    }

    pub fn get(&self, path: &str) -> Option<&MatchingRule> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatchingRule)> {
        self.0.iter().map(|(path, rule)| (path.as_str(), rule))
    }
}

impl<K: Into<String>> FromIterator<(K, MatchingRule)> for MatchingRules {
    fn from_iter<I: IntoIterator<Item = (K, MatchingRule)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
