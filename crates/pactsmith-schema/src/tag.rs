//! Field annotation grammar.
//!
//! An annotation is a comma-separated list of `key=value` pairs. The keys a
//! field accepts depend on its kind:
//!
//! | Field kind            | Accepted annotation                      |
//! |-----------------------|------------------------------------------|
//! | bool, integer, float  | `example=<literal>`                      |
//! | string                | `example=<literal>[,regex=<pattern>]`    |
//! | sequence, array       | `min=<non-negative integer>`             |
//!
//! A comma only separates pairs when it is followed by `key=`; otherwise it
//! belongs to the current value. Whitespace around keys and before values is
//! ignored. `regex` must come last and its value runs
//! to the end of the annotation, so patterns may contain commas.

use crate::schema::{FloatWidth, IntWidth, TypeDef};
use serde_json::{Number, Value};
use std::fmt;

/// Minimum sequence length when no `min=` is given.
pub const DEFAULT_MIN_ITEMS: usize = 1;

/// Which grammar applies to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Bool,
    Integer(IntWidth),
    Float(FloatWidth),
    String,
    Sequence,
    Structure,
}

impl AnnotationKind {
    /// The grammar for a field of type `ty`, looking through pointers.
    ///
    /// `None` for kinds the synthesizer cannot handle at all.
    pub fn for_type(ty: &TypeDef) -> Option<Self> {
        match ty.dereferenced() {
            TypeDef::Bool => Some(Self::Bool),
            TypeDef::Integer { width } => Some(Self::Integer(*width)),
            TypeDef::Float { width } => Some(Self::Float(*width)),
            TypeDef::String => Some(Self::String),
            TypeDef::Sequence { .. } | TypeDef::Array { .. } => Some(Self::Sequence),
            TypeDef::Struct { .. } => Some(Self::Structure),
            TypeDef::Pointer { .. }
            | TypeDef::Map { .. }
            | TypeDef::Any
            | TypeDef::Opaque { .. } => None,
        }
    }

    fn accepts(self, key: Key) -> bool {
        match self {
            Self::Bool | Self::Integer(_) | Self::Float(_) => key == Key::Example,
            Self::String => matches!(key, Key::Example | Key::Regex),
            Self::Sequence => key == Key::Min,
            Self::Structure => false,
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("boolean"),
            Self::Integer(width) => write!(f, "integer ({width})"),
            Self::Float(width) => write!(f, "float ({width})"),
            Self::String => f.write_str("string"),
            Self::Sequence => f.write_str("sequence"),
            Self::Structure => f.write_str("structure"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Example,
    Regex,
    Min,
}

impl Key {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "example" => Some(Self::Example),
            "regex" => Some(Self::Regex),
            "min" => Some(Self::Min),
            _ => None,
        }
    }
}

/// A typed example value from `example=`.
#[derive(Debug, Clone, PartialEq)]
pub enum Example {
    Bool(bool),
    Integer(Number),
    Float(f64),
    String(String),
}

impl Example {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Bool(value) => Value::Bool(*value),
            Self::Integer(value) => Value::Number(value.clone()),
            Self::Float(value) => Value::from(*value),
            Self::String(value) => Value::String(value.clone()),
        }
    }
}

/// Parameters parsed from one field's annotation.
///
/// Built fresh per field during a synthesis pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagParams {
    pub example: Option<Example>,
    pub regex: Option<String>,
    pub min: Option<usize>,
}

impl TagParams {
    /// The `min=` value, or [`DEFAULT_MIN_ITEMS`].
    pub fn min_items(&self) -> usize {
        self.min.unwrap_or(DEFAULT_MIN_ITEMS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    #[error("expected `key=value`, found `{segment}`")]
    MalformedPair { segment: String },

    #[error("unknown key `{key}`")]
    UnknownKey { key: String },

    #[error("key `{key}` is not accepted on {kind} fields")]
    KeyNotAllowed { key: String, kind: AnnotationKind },

    #[error("duplicate key `{key}`")]
    DuplicateKey { key: String },

    #[error("`{key}` must not be empty")]
    EmptyValue { key: String },

    #[error("`regex` requires a preceding `example`")]
    RegexWithoutExample,

    #[error("invalid {expected} literal `{value}`")]
    InvalidLiteral {
        expected: &'static str,
        value: String,
    },

    #[error("{value} is out of range for {width}")]
    OutOfRange { value: i128, width: IntWidth },
    #[error("{value} is out of range for {width}")]
    FloatOutOfRange { value: String, width: FloatWidth },

    #[error("{kind} fields do not take annotations")]
    NotAnnotatable { kind: AnnotationKind },
}

/// Parse `raw` under the grammar for `kind`.
///
/// An empty or whitespace-only annotation yields default parameters.
pub fn parse_annotation(kind: AnnotationKind, raw: &str) -> Result<TagParams, AnnotationError> {
    if raw.trim().is_empty() {
        return Ok(TagParams::default());
    }
    if kind == AnnotationKind::Structure {
        return Err(AnnotationError::NotAnnotatable { kind });
    }

    let mut params = TagParams::default();
    let mut seen: Vec<Key> = Vec::new();
    for (raw_key, value) in split_pairs(raw)? {
        let key = Key::parse(raw_key).ok_or_else(|| AnnotationError::UnknownKey {
            key: raw_key.to_string(),
        })?;
        if !kind.accepts(key) {
            return Err(AnnotationError::KeyNotAllowed {
                key: raw_key.to_string(),
                kind,
            });
        }
        if seen.contains(&key) {
            return Err(AnnotationError::DuplicateKey {
                key: raw_key.to_string(),
            });
        }
        seen.push(key);

        if value.trim().is_empty() {
            return Err(AnnotationError::EmptyValue {
                key: raw_key.to_string(),
            });
        }

        match key {
            Key::Example => params.example = Some(parse_example(kind, value)?),
            Key::Regex => {
                if params.example.is_none() {
                    return Err(AnnotationError::RegexWithoutExample);
                }
                params.regex = Some(value.to_string());
            }
            Key::Min => {
                let min = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| AnnotationError::InvalidLiteral {
                        expected: "non-negative integer",
                        value: value.to_string(),
                    })?;
                params.min = Some(min);
            }
        }
    }
    Ok(params)
}

fn parse_example(kind: AnnotationKind, value: &str) -> Result<Example, AnnotationError> {
    let literal = value.trim();
    match kind {
        AnnotationKind::Bool => match literal {
            "true" => Ok(Example::Bool(true)),
            "false" => Ok(Example::Bool(false)),
            _ => Err(AnnotationError::InvalidLiteral {
                expected: "boolean",
                value: value.to_string(),
            }),
        },
        AnnotationKind::Integer(width) => {
            let parsed = literal
                .parse::<i128>()
                .map_err(|_| AnnotationError::InvalidLiteral {
                    expected: "integer",
                    value: value.to_string(),
                })?;
            if !width.contains(parsed) {
                return Err(AnnotationError::OutOfRange {
                    value: parsed,
                    width,
                });
            }
            integer_number(parsed).ok_or(AnnotationError::OutOfRange {
                value: parsed,
                width,
            })
        }
        AnnotationKind::Float(width) => match literal.parse::<f64>() {
            Ok(parsed) if !parsed.is_finite() => Err(AnnotationError::InvalidLiteral {
                expected: "float",
                value: value.to_string(),
            }),
            Ok(parsed) if !width.contains(parsed) => Err(AnnotationError::FloatOutOfRange {
                value: literal.to_string(),
                width,
            }),
            Ok(parsed) => Ok(Example::Float(parsed)),
            Err(_) => Err(AnnotationError::InvalidLiteral {
                expected: "float",
                value: value.to_string(),
            }),
        },
        AnnotationKind::String => Ok(Example::String(value.to_string())),
        AnnotationKind::Sequence | AnnotationKind::Structure => {
            Err(AnnotationError::KeyNotAllowed {
                key: "example".to_string(),
                kind,
            })
        }
    }
}

fn integer_number(value: i128) -> Option<Example> {
    if let Ok(signed) = i64::try_from(value) {
        return Some(Example::Integer(Number::from(signed)));
    }
    u64::try_from(value)
        .ok()
        .map(|unsigned| Example::Integer(Number::from(unsigned)))
}

fn split_pairs(raw: &str) -> Result<Vec<(&str, &str)>, AnnotationError> {
    let mut pairs = Vec::new();
    let mut rest = raw;
    loop {
        let Some((key, tail)) = rest.split_once('=') else {
            return Err(AnnotationError::MalformedPair {
                segment: rest.trim().to_string(),
            });
        };
        let key = key.trim();
        if !is_key(key) {
            return Err(AnnotationError::MalformedPair {
                segment: key.to_string(),
            });
        }
        let tail = tail.trim_start();
        if key == "regex" {
            pairs.push((key, tail));
            break;
        }
        match next_pair_boundary(tail) {
            Some(index) => {
                pairs.push((key, &tail[..index]));
                rest = &tail[index + 1..];
            }
            None => {
                pairs.push((key, tail));
                break;
            }
        }
    }
    Ok(pairs)
}

fn is_key(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

/// Byte offset of the first comma followed by `key=` (whitespace allowed around the key).
fn next_pair_boundary(text: &str) -> Option<usize> {
    text.match_indices(',')
        .map(|(index, _)| index)
        .find(|&index| starts_with_pair(text[index + 1..].trim_start()))
}

fn starts_with_pair(text: &str) -> bool {
    let key_len = text
        .bytes()
        .take_while(|byte| byte.is_ascii_alphanumeric() || *byte == b'_')
        .count();
    key_len > 0 && text[key_len..].trim_start().starts_with('=')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_annotation_selects_defaults() {
        let params = parse_annotation(AnnotationKind::Sequence, "  ").expect("defaults");
        assert_eq!(params, TagParams::default());
        assert_eq!(params.min_items(), DEFAULT_MIN_ITEMS);
    }

    #[test]
    fn sequence_minimum() {
        let params = parse_annotation(AnnotationKind::Sequence, "min=2").expect("parse");
        assert_eq!(params.min, Some(2));
        assert_eq!(params.min_items(), 2);
    }

    #[test]
    fn sequence_minimum_rejects_non_numeric() {
        let error = parse_annotation(AnnotationKind::Sequence, "min=abc").expect_err("invalid");
        assert_eq!(
            error,
            AnnotationError::InvalidLiteral {
                expected: "non-negative integer",
                value: "abc".to_string()
            }
        );
        assert!(parse_annotation(AnnotationKind::Sequence, "min=-1").is_err());
    }

    #[test]
    fn string_example_with_regex() {
        let params = parse_annotation(
            AnnotationKind::String,
            r"example=2000-01-01,regex=^\d{4}-\d{2}-\d{2}$",
        )
        .expect("parse");
        assert_eq!(
            params.example,
            Some(Example::String("2000-01-01".to_string()))
        );
        assert_eq!(params.regex.as_deref(), Some(r"^\d{4}-\d{2}-\d{2}$"));
    }

    #[test]
    fn regex_value_runs_to_end_of_annotation() {
        let params = parse_annotation(AnnotationKind::String, r"example=12,regex=^\d{1,3},min=2$")
            .expect("parse");
        assert_eq!(params.regex.as_deref(), Some(r"^\d{1,3},min=2$"));
    }

    #[test]
    fn spaced_keys_are_recognised_in_every_position() {
        let params =
            parse_annotation(AnnotationKind::String, "example=x, regex = ^a$").expect("parse");
        assert_eq!(params.example, Some(Example::String("x".to_string())));
        assert_eq!(params.regex.as_deref(), Some("^a$"));

        let first = parse_annotation(AnnotationKind::Sequence, " min = 3").expect("parse");
        assert_eq!(first.min, Some(3));

        assert_eq!(
            parse_annotation(AnnotationKind::String, "example=x, colour = red"),
            Err(AnnotationError::UnknownKey {
                key: "colour".to_string()
            })
        );
    }

    #[test]
    fn commas_inside_values_are_kept() {
        let params =
            parse_annotation(AnnotationKind::String, "example=hello, world").expect("parse");
        assert_eq!(
            params.example,
            Some(Example::String("hello, world".to_string()))
        );
    }

    #[test]
    fn empty_regex_segment_is_rejected() {
        let error =
            parse_annotation(AnnotationKind::String, "example=abc,regex=").expect_err("empty");
        assert_eq!(
            error,
            AnnotationError::EmptyValue {
                key: "regex".to_string()
            }
        );
    }

    #[test]
    fn regex_requires_example() {
        let error = parse_annotation(AnnotationKind::String, "regex=^a$").expect_err("missing");
        assert_eq!(error, AnnotationError::RegexWithoutExample);
    }

    #[test]
    fn unknown_and_misplaced_keys_are_rejected() {
        assert_eq!(
            parse_annotation(AnnotationKind::Bool, "sample=true"),
            Err(AnnotationError::UnknownKey {
                key: "sample".to_string()
            })
        );
        assert_eq!(
            parse_annotation(AnnotationKind::Integer(IntWidth::I64), "min=3"),
            Err(AnnotationError::KeyNotAllowed {
                key: "min".to_string(),
                kind: AnnotationKind::Integer(IntWidth::I64)
            })
        );
        assert_eq!(
            parse_annotation(AnnotationKind::Bool, "example=true,example=false"),
            Err(AnnotationError::DuplicateKey {
                key: "example".to_string()
            })
        );
        assert!(matches!(
            parse_annotation(AnnotationKind::Sequence, "2"),
            Err(AnnotationError::MalformedPair { .. })
        ));
    }

    #[test]
    fn typed_examples() {
        assert_eq!(
            parse_annotation(AnnotationKind::Bool, "example=false")
                .expect("bool")
                .example,
            Some(Example::Bool(false))
        );
        assert_eq!(
            parse_annotation(AnnotationKind::Float(FloatWidth::F64), "example=2.5")
                .expect("float")
                .example,
            Some(Example::Float(2.5))
        );
        let big = parse_annotation(
            AnnotationKind::Integer(IntWidth::U64),
            "example=18446744073709551615",
        )
        .expect("u64 max");
        assert_eq!(
            big.example.map(|example| example.to_value()),
            Some(Value::from(u64::MAX))
        );
    }

    #[test]
    fn invalid_literals() {
        assert!(parse_annotation(AnnotationKind::Bool, "example=yes").is_err());
        assert!(parse_annotation(AnnotationKind::Float(FloatWidth::F64), "example=NaN").is_err());
        assert_eq!(
            parse_annotation(AnnotationKind::Integer(IntWidth::U8), "example=300"),
            Err(AnnotationError::OutOfRange {
                value: 300,
                width: IntWidth::U8
            })
        );
    }

    #[test]
    fn float_examples_respect_width() {
        assert_eq!(
            parse_annotation(AnnotationKind::Float(FloatWidth::F32), "example=1e300"),
            Err(AnnotationError::FloatOutOfRange {
                value: "1e300".to_string(),
                width: FloatWidth::F32
            })
        );
        assert_eq!(
            parse_annotation(AnnotationKind::Float(FloatWidth::F32), "example=-2.5e10")
                .expect("fits f32")
                .example,
            Some(Example::Float(-2.5e10))
        );
        assert_eq!(
            parse_annotation(AnnotationKind::Float(FloatWidth::F64), "example=1e300")
                .expect("fits f64")
                .example,
            Some(Example::Float(1e300))
        );
    }

    #[test]
    fn structures_take_no_annotation() {
        assert_eq!(
            parse_annotation(AnnotationKind::Structure, "min=1"),
            Err(AnnotationError::NotAnnotatable {
                kind: AnnotationKind::Structure
            })
        );
    }

    #[test]
    fn kind_follows_pointers() {
        let ty = TypeDef::pointer(TypeDef::sequence(TypeDef::Bool));
        assert_eq!(AnnotationKind::for_type(&ty), Some(AnnotationKind::Sequence));
        assert_eq!(AnnotationKind::for_type(&TypeDef::Any), None);
    }
}
