//! # pactsmith kernel
//!
//! Matcher trees for contract-testing fixtures.
//!
//! A fixture is described as a [`Node`] tree: JSON literals, mappings and
//! sequences, with [`Matcher`]s wherever a verifier should compare by type,
//! by regular expression, or by repetition count instead of by value.
//! [`build_body`] turns the tree into the pair a contract file carries:
//!
//! ```text
//! Node tree
//!     │  build_body
//!     ▼
//! PactBody { body: <literal JSON>, matchingRules: { "$.body...": {...} } }
//! ```
//!
//! ```
//! use pactsmith_kernel::{Node, build_body, dsl::{each_like, regex}};
//! use serde_json::json;
//!
//! let tree = Node::map([(
//!     "users",
//!     each_like(Node::map([("user", regex("someusername", "\\s+"))]), 3),
//! )]);
//! let pact = build_body(&tree);
//!
//! assert_eq!(pact.body["users"][2], json!({"user": "someusername"}));
//! assert!(pact.matching_rules.get("$.body.users[*].user").is_some());
//! ```

pub mod body;
pub mod dsl;
pub mod error;
pub mod format;
pub mod matcher;
pub mod node;
pub mod path;
pub mod patterns;
pub mod rule;

pub use body::{PactBody, build_body};
pub use error::DocumentError;
pub use format::{format_json, format_json_value, object_to_string, parse_document};
pub use matcher::{Matcher, MatcherClass};
pub use node::Node;
pub use path::{ALL_ITEMS, BODY_ROOT, JsonPath};
pub use rule::{MatchKind, MatchingRule, MatchingRules};
