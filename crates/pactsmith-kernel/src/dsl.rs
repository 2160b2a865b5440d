//! Matcher factories.
//!
//! Pure constructors; aliases are separate entry points over one shared
//! constructor.

use crate::matcher::Matcher;
use crate::node::Node;
use crate::patterns::{self, examples};

fn repeat(contents: Node, min: usize, max: usize) -> Matcher {
    Matcher::EachLike {
        contents: Box::new(contents),
        min,
        max,
    }
}

/// A sequence of at least `min` elements shaped like `contents`.
///
/// `min` should be 1 or greater; the example document holds exactly `min`
/// copies.
pub fn each_like(contents: impl Into<Node>, min: usize) -> Matcher {
    repeat(contents.into(), min, 0)
}

/// Alias of [`each_like`].
pub fn array_min_like(contents: impl Into<Node>, min: usize) -> Matcher {
    repeat(contents.into(), min, 0)
}

/// A sequence of at most `max` elements shaped like `contents`.
pub fn array_max_like(contents: impl Into<Node>, max: usize) -> Matcher {
    repeat(contents.into(), 0, max)
}

/// Match by type (string, number, ...) rather than by value.
pub fn like(contents: impl Into<Node>) -> Matcher {
    Matcher::Like(Box::new(contents.into()))
}

/// Generate `example` and match with the regular expression `pattern`.
pub fn term(example: impl Into<String>, pattern: impl Into<String>) -> Matcher {
    Matcher::Regex {
        example: example.into(),
        pattern: pattern.into(),
    }
}

/// Alias of [`term`].
pub fn regex(example: impl Into<String>, pattern: impl Into<String>) -> Matcher {
    term(example, pattern)
}

/// A plain string in matcher position.
pub fn string(value: impl Into<String>) -> Matcher {
    Matcher::RawString(value.into())
}

/// Short alias of [`string`].
pub fn s(value: impl Into<String>) -> Matcher {
    string(value)
}

/// A nested object whose field values may be matchers.
pub fn object<K, V, I>(fields: I) -> Matcher
where
    K: Into<String>,
    V: Into<Node>,
    I: IntoIterator<Item = (K, V)>,
{
    Matcher::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect(),
    )
}

/// Hexadecimal-encoded strings.
pub fn hex_value() -> Matcher {
    term(examples::HEXADECIMAL, patterns::HEXADECIMAL)
}

/// Integer identifiers, matched by type.
pub fn identifier() -> Matcher {
    like(42)
}

/// Alias of [`identifier`].
pub fn integer() -> Matcher {
    identifier()
}

/// Decimal values, matched by type.
pub fn decimal() -> Matcher {
    like(42.0)
}

/// Dotted-quad IPv4 addresses.
pub fn ip_address() -> Matcher {
    term(examples::IPV4_ADDRESS, patterns::IP_ADDRESS)
}

/// Alias of [`ip_address`].
pub fn ipv4_address() -> Matcher {
    ip_address()
}

/// IPv6 addresses.
///
/// Emits the IPv4 pattern, as existing fixtures do; the dedicated
/// [`patterns::IPV6_ADDRESS`] is exported but not wired in.
pub fn ipv6_address() -> Matcher {
    term(examples::IPV6_ADDRESS, patterns::IP_ADDRESS)
}

/// ISO-8601 timestamps (`yyyy-MM-dd'T'HH:mm:ss`).
pub fn timestamp() -> Matcher {
    term(examples::TIMESTAMP, patterns::TIMESTAMP)
}

/// ISO-8601 dates (`yyyy-MM-dd`).
pub fn date() -> Matcher {
    term(examples::DATE, patterns::DATE)
}

/// ISO-8601 times (`'T'HH:mm:ss`).
pub fn time() -> Matcher {
    term(examples::TIME, patterns::TIME)
}

/// Lowercase hyphenated UUIDs.
pub fn uuid() -> Matcher {
    term(examples::UUID, patterns::UUID)
}
