//! # pactsmith schema
//!
//! Derives matcher trees from schema descriptions.
//!
//! ```text
//! TypeDef (+ per-field annotations)
//!     │  Synthesizer::synthesize      ← tag::parse_annotation per field
//!     ▼
//! Node tree  ──build_body──▶  PactBody
//! ```
//!
//! ```
//! use pactsmith_schema::{FieldDef, TypeDef, Synthesizer};
//!
//! let ty = TypeDef::structure(
//!     "Page",
//!     vec![FieldDef::new("rows", TypeDef::sequence(TypeDef::String)).annotate("min=2")],
//! );
//! let pact = Synthesizer::default().build(&ty).unwrap();
//! assert_eq!(pact.body["rows"].as_array().map(Vec::len), Some(2));
//! ```

pub mod config;
pub mod schema;
pub mod synth;
pub mod tag;

pub use config::{ConfigError, SynthesisDefaults};
pub use schema::{FieldDef, FloatWidth, IntWidth, TypeDef};
pub use synth::{SynthesisError, Synthesizer, match_type};
pub use tag::{
    AnnotationError, AnnotationKind, DEFAULT_MIN_ITEMS, Example, TagParams, parse_annotation,
};
