//! Matcher synthesis from schema descriptions.
//!
//! Walks a [`TypeDef`] and produces a matcher tree mirroring its shape:
//!
//! | Kind              | Synthesized matcher                                   |
//! |-------------------|-------------------------------------------------------|
//! | pointer           | whatever the pointed-to type synthesizes              |
//! | sequence / array  | `EachLike(element, min)`                              |
//! | struct            | `Object` keyed by each field's wire name              |
//! | string            | `Regex(example, pattern)` if annotated, else `Like`   |
//! | bool / int / float| `Like(example)`                                       |
//! | anything else     | [`SynthesisError::UnsupportedTypeKind`]               |
//!
//! Sequence elements are synthesized with default parameters; a field's
//! annotation never reaches into its element type.

use crate::config::SynthesisDefaults;
use crate::schema::{FieldDef, IntWidth, TypeDef};
use crate::tag::{AnnotationError, AnnotationKind, Example, TagParams, parse_annotation};
use pactsmith_kernel::dsl::{each_like, like, term};
use pactsmith_kernel::{Matcher, Node, PactBody, build_body};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Synthesis failures. Either one aborts the pass; no partial tree is returned.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("{path}: unsupported type kind `{kind}`")]
    UnsupportedTypeKind { path: String, kind: String },

    #[error("{path}: invalid annotation {annotation:?}: {source}")]
    InvalidAnnotation {
        path: String,
        annotation: String,
        #[source]
        source: AnnotationError,
    },
    #[error("{path}: default integer example {value} is out of range for {width}")]
    DefaultOutOfRange {
        path: String,
        value: i64,
        width: IntWidth,
    },
}

impl SynthesisError {
    /// Diagnostic path of the offending field, e.g. `User.friends[].name`.
    pub fn path(&self) -> &str {
        match self {
            Self::UnsupportedTypeKind { path, .. }
            | Self::InvalidAnnotation { path, .. }
            | Self::DefaultOutOfRange { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    defaults: SynthesisDefaults,
}

impl Synthesizer {
    pub fn new(defaults: SynthesisDefaults) -> Self {
        Self { defaults }
    }

    /// Synthesize a matcher tree for `ty`.
    pub fn synthesize(&self, ty: &TypeDef) -> Result<Node, SynthesisError> {
        let root = root_label(ty);
        let _span = tracing::debug_span!("synthesize", root = %root).entered();
        self.synthesize_at(ty, &TagParams::default(), &root)
            .inspect_err(|error| warn!(error = %error, "matcher synthesis failed"))
    }

    /// Synthesize a matcher tree for `ty` and build its body and rules.
    pub fn build(&self, ty: &TypeDef) -> Result<PactBody, SynthesisError> {
        let tree = self.synthesize(ty)?;
        Ok(build_body(&tree))
    }

    fn synthesize_at(
        &self,
        ty: &TypeDef,
        params: &TagParams,
        path: &str,
    ) -> Result<Node, SynthesisError> {
        match ty {
            TypeDef::Pointer { to } => self.synthesize_at(to, params, path),
            TypeDef::Sequence { element } | TypeDef::Array { element, .. } => {
                let element =
                    self.synthesize_at(element, &TagParams::default(), &format!("{path}[]"))?;
                let min = params.min.unwrap_or(self.defaults.min_items);
                Ok(each_like(element, min).into())
            }
            TypeDef::Struct { name, fields } => self.synthesize_struct(name, fields, path),
            TypeDef::String => Ok(self.string_matcher(params).into()),
            TypeDef::Bool => {
                let example = match params.example {
                    Some(Example::Bool(value)) => value,
                    _ => self.defaults.bool_example,
                };
                Ok(like(example).into())
            }
            TypeDef::Integer { width } => {
                let example = match &params.example {
                    Some(Example::Integer(value)) => value.clone(),
                    _ => self.default_integer(*width, path)?,
                };
                Ok(like(Value::Number(example)).into())
            }
            TypeDef::Float { .. } => {
                let example = match params.example {
                    Some(Example::Float(value)) => value,
                    _ => self.defaults.float_example,
                };
                Ok(like(example).into())
            }
            TypeDef::Map { .. } | TypeDef::Any | TypeDef::Opaque { .. } => {
                Err(SynthesisError::UnsupportedTypeKind {
                    path: path.to_string(),
                    kind: kind_label(ty),
                })
            }
        }
    }

    fn synthesize_struct(
        &self,
        name: &str,
        fields: &[FieldDef],
        path: &str,
    ) -> Result<Node, SynthesisError> {
        debug!(structure = name, fields = fields.len(), path, "synthesizing structure");
        let mut object = BTreeMap::new();
        for field in fields {
            let field_path = format!("{path}.{}", field.name);
            let params = field_params(field, &field_path)?;
            let node = self.synthesize_at(&field.ty, &params, &field_path)?;
            if object.insert(field.key().to_string(), node).is_some() {
                warn!(
                    structure = name,
                    key = field.key(),
                    "duplicate wire name; later field replaces earlier"
                );
            }
        }
        Ok(Matcher::Object(object).into())
    }

    fn default_integer(&self, width: IntWidth, path: &str) -> Result<Number, SynthesisError> {
        let value = self.defaults.integer_example;
        if !width.contains(i128::from(value)) {
            return Err(SynthesisError::DefaultOutOfRange {
                path: path.to_string(),
                value,
                width,
            });
        }
        Ok(Number::from(value))
    }

    fn string_matcher(&self, params: &TagParams) -> Matcher {
        let example = match &params.example {
            Some(Example::String(value)) => value.clone(),
            _ => self.defaults.string_example.clone(),
        };
        match &params.regex {
            Some(pattern) => term(example, pattern.as_str()),
            None => like(example),
        }
    }
}

/// Synthesize with the documented defaults.
pub fn match_type(ty: &TypeDef) -> Result<Node, SynthesisError> {
    Synthesizer::default().synthesize(ty)
}

fn field_params(field: &FieldDef, path: &str) -> Result<TagParams, SynthesisError> {
    let Some(annotation) = field.annotation.as_deref() else {
        return Ok(TagParams::default());
    };
    // Unsupported kinds are reported by the walk itself.
    let Some(kind) = AnnotationKind::for_type(&field.ty) else {
        return Ok(TagParams::default());
    };
    parse_annotation(kind, annotation).map_err(|source| SynthesisError::InvalidAnnotation {
        path: path.to_string(),
        annotation: annotation.to_string(),
        source,
    })
}

fn root_label(ty: &TypeDef) -> String {
    match ty.dereferenced() {
        TypeDef::Struct { name, .. } => name.clone(),
        other => other.kind_name().to_string(),
    }
}

fn kind_label(ty: &TypeDef) -> String {
    match ty {
        TypeDef::Opaque { name } => format!("opaque ({name})"),
        other => other.kind_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FloatWidth, IntWidth};
    use pactsmith_kernel::MatchingRule;
    use pactsmith_kernel::dsl::object;
    use serde_json::json;

    fn user() -> TypeDef {
        TypeDef::structure(
            "User",
            vec![
                FieldDef::new("name", TypeDef::String),
                FieldDef::new("active", TypeDef::Bool),
                FieldDef::new("age", TypeDef::integer(IntWidth::U8)),
                FieldDef::new("score", TypeDef::float(FloatWidth::F32)),
            ],
        )
    }

    #[test]
    fn defaults_per_kind() {
        let tree = match_type(&user()).expect("synthesize");
        let expected = Node::from(object([
            ("active", like(true)),
            ("age", like(1)),
            ("name", like("string")),
            ("score", like(1.1)),
        ]));
        assert_eq!(tree, expected);
    }

    #[test]
    fn annotated_examples_replace_defaults() {
        let ty = TypeDef::structure(
            "Flags",
            vec![
                FieldDef::new("on", TypeDef::Bool).annotate("example=false"),
                FieldDef::new("count", TypeDef::integer(IntWidth::I32)).annotate("example=0"),
                FieldDef::new("ratio", TypeDef::float(FloatWidth::F64)).annotate("example=0.5"),
                FieldDef::new("label", TypeDef::String).annotate("example=hi"),
            ],
        );
        let pact = Synthesizer::default().build(&ty).expect("build");
        assert_eq!(
            pact.body,
            json!({"on": false, "count": 0, "ratio": 0.5, "label": "hi"})
        );
    }

    #[test]
    fn sequence_minimum_and_regex_rules() {
        let ty = TypeDef::structure(
            "Calendar",
            vec![
                FieldDef::new(
                    "days",
                    TypeDef::sequence(TypeDef::structure(
                        "Day",
                        vec![FieldDef::new("date", TypeDef::String)
                            .annotate(r"example=2000-01-01,regex=^\d{4}-\d{2}-\d{2}$")],
                    )),
                )
                .annotate("min=2"),
            ],
        );
        let pact = Synthesizer::default().build(&ty).expect("build");
        assert_eq!(
            pact.matching_rules.get("$.body.days"),
            Some(&MatchingRule::by_type().with_min(2))
        );
        assert_eq!(
            pact.matching_rules.get("$.body.days[*].date"),
            Some(&MatchingRule::by_regex(r"^\d{4}-\d{2}-\d{2}$"))
        );
        assert_eq!(
            pact.body,
            json!({"days": [{"date": "2000-01-01"}, {"date": "2000-01-01"}]})
        );
    }

    #[test]
    fn pointers_are_transparent_for_values_and_annotations() {
        let ty = TypeDef::pointer(TypeDef::structure(
            "Holder",
            vec![
                FieldDef::new(
                    "ids",
                    TypeDef::pointer(TypeDef::sequence(TypeDef::integer(IntWidth::I64))),
                )
                .annotate("min=3"),
            ],
        ));
        let pact = Synthesizer::default().build(&ty).expect("build");
        assert_eq!(pact.body, json!({"ids": [1, 1, 1]}));
        assert_eq!(
            pact.matching_rules.get("$.body.ids"),
            Some(&MatchingRule::by_type().with_min(3))
        );
        assert_eq!(
            pact.matching_rules.get("$.body"),
            Some(&MatchingRule::by_type())
        );
    }

    #[test]
    fn wire_names_key_the_object() {
        let ty = TypeDef::structure(
            "User",
            vec![FieldDef::new("born", TypeDef::String).wire("dob")],
        );
        let pact = Synthesizer::default().build(&ty).expect("build");
        assert_eq!(pact.body, json!({"dob": "string"}));
    }

    #[test]
    fn unsupported_kind_aborts_with_path() {
        let ty = TypeDef::structure(
            "Outer",
            vec![FieldDef::new(
                "items",
                TypeDef::sequence(TypeDef::structure(
                    "Inner",
                    vec![FieldDef::new("meta", TypeDef::map(TypeDef::String))],
                )),
            )],
        );
        let error = match_type(&ty).expect_err("map is unsupported");
        assert!(matches!(
            &error,
            SynthesisError::UnsupportedTypeKind { path, kind }
                if path == "Outer.items[].meta" && kind == "map"
        ));
        assert_eq!(error.path(), "Outer.items[].meta");
    }

    #[test]
    fn invalid_annotation_aborts() {
        let ty = TypeDef::structure(
            "Page",
            vec![FieldDef::new("rows", TypeDef::sequence(TypeDef::String)).annotate("min=abc")],
        );
        let error = match_type(&ty).expect_err("invalid min");
        assert!(matches!(
            error,
            SynthesisError::InvalidAnnotation { ref path, ref annotation, .. }
                if path == "Page.rows" && annotation == "min=abc"
        ));
    }

    #[test]
    fn configured_defaults_apply() {
        let synthesizer = Synthesizer::new(SynthesisDefaults {
            string_example: "n/a".to_string(),
            min_items: 2,
            ..SynthesisDefaults::default()
        });
        let ty = TypeDef::structure(
            "Tags",
            vec![FieldDef::new("tags", TypeDef::sequence(TypeDef::String))],
        );
        let pact = synthesizer.build(&ty).expect("build");
        assert_eq!(pact.body, json!({"tags": ["n/a", "n/a"]}));
    }

    #[test]
    fn integer_default_is_checked_against_field_width() {
        let synthesizer = Synthesizer::new(SynthesisDefaults {
            integer_example: 300,
            ..SynthesisDefaults::default()
        });
        let ty = TypeDef::structure(
            "Pixel",
            vec![
                FieldDef::new("x", TypeDef::integer(IntWidth::U16)),
                FieldDef::new("alpha", TypeDef::integer(IntWidth::U8)),
            ],
        );
        let error = synthesizer.build(&ty).expect_err("300 does not fit u8");
        assert!(matches!(
            &error,
            SynthesisError::DefaultOutOfRange { path, value: 300, width: IntWidth::U8 }
                if path == "Pixel.alpha"
        ));

        let annotated = TypeDef::structure(
            "Pixel",
            vec![FieldDef::new("alpha", TypeDef::integer(IntWidth::U8)).annotate("example=255")],
        );
        let pact = synthesizer.build(&annotated).expect("annotation overrides default");
        assert_eq!(pact.body, json!({"alpha": 255}));
    }

    #[test]
    fn f32_float_annotation_out_of_range_aborts() {
        let ty = TypeDef::structure(
            "Reading",
            vec![FieldDef::new("x", TypeDef::float(FloatWidth::F32)).annotate("example=1e300")],
        );
        let error = match_type(&ty).expect_err("1e300 overflows f32");
        assert!(matches!(
            error,
            SynthesisError::InvalidAnnotation {
                ref path,
                source: AnnotationError::FloatOutOfRange { width: FloatWidth::F32, .. },
                ..
            } if path == "Reading.x"
        ));
    }

    #[test]
    fn opaque_kind_names_the_host_type() {
        let error = match_type(&TypeDef::Opaque {
            name: "chan int".to_string(),
        })
        .expect_err("opaque");
        assert_eq!(
            error.to_string(),
            "opaque: unsupported type kind `opaque (chan int)`"
        );
    }
}
