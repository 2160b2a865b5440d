//! Explicit schema descriptions.
//!
//! A [`TypeDef`] describes the shape of a message type as data: the caller
//! builds it once (in code, or deserialized from JSON) and the synthesizer
//! walks it instead of inspecting runtime type metadata.
//!
//! ```json
//! {
//!   "kind": "struct",
//!   "name": "User",
//!   "fields": [
//!     { "name": "id", "type": { "kind": "integer", "width": "u32" } },
//!     { "name": "born", "wireName": "dob", "type": { "kind": "string" },
//!       "annotation": "example=2000-01-01,regex=^\\d{4}-\\d{2}-\\d{2}$" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    /// A reference to another type; dereferenced transparently.
    Pointer { to: Box<TypeDef> },

    /// A variable-length sequence.
    Sequence { element: Box<TypeDef> },

    /// A fixed-length array; synthesized like a sequence.
    Array { element: Box<TypeDef>, len: usize },

    /// A nested structure with named fields.
    Struct {
        name: String,
        #[serde(default)]
        fields: Vec<FieldDef>,
    },

    String,

    Bool,

    Integer {
        #[serde(default)]
        width: IntWidth,
    },

    Float {
        #[serde(default)]
        width: FloatWidth,
    },

    /// Key/value maps. Not synthesizable.
    Map { value: Box<TypeDef> },

    /// Dynamically typed values. Not synthesizable.
    Any,

    /// Anything else the host type system has (functions, channels, ...).
    /// Not synthesizable.
    Opaque { name: String },
}

impl TypeDef {
    pub fn pointer(to: TypeDef) -> Self {
        Self::Pointer { to: Box::new(to) }
    }

    pub fn sequence(element: TypeDef) -> Self {
        Self::Sequence {
            element: Box::new(element),
        }
    }

    pub fn array(element: TypeDef, len: usize) -> Self {
        Self::Array {
            element: Box::new(element),
            len,
        }
    }

    pub fn structure(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self::Struct {
            name: name.into(),
            fields,
        }
    }

    pub fn integer(width: IntWidth) -> Self {
        Self::Integer { width }
    }

    pub fn float(width: FloatWidth) -> Self {
        Self::Float { width }
    }

    pub fn map(value: TypeDef) -> Self {
        Self::Map {
            value: Box::new(value),
        }
    }

    /// Strip any number of pointer layers.
    pub fn dereferenced(&self) -> &TypeDef {
        let mut current = self;
        while let Self::Pointer { to } = current {
            current = to.as_ref();
        }
        current
    }

    /// Short kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Pointer { .. } => "pointer",
            Self::Sequence { .. } => "sequence",
            Self::Array { .. } => "array",
            Self::Struct { .. } => "struct",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer { .. } => "integer",
            Self::Float { .. } => "float",
            Self::Map { .. } => "map",
            Self::Any => "any",
            Self::Opaque { .. } => "opaque",
        }
    }
}

/// One field of a [`TypeDef::Struct`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,

    /// Key used in the JSON document; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_name: Option<String>,

    #[serde(rename = "type")]
    pub ty: TypeDef,

    /// Field annotation, e.g. `min=2` or `example=abc,regex=^[a-z]+$`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
        Self {
            name: name.into(),
            wire_name: None,
            ty,
            annotation: None,
        }
    }

    pub fn wire(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    pub fn annotate(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn key(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntWidth {
    I8,
    I16,
    I32,
    #[default]
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntWidth {
    /// Inclusive range of values representable at this width.
    pub fn bounds(self) -> (i128, i128) {
        match self {
            Self::I8 => (i8::MIN.into(), i8::MAX.into()),
            Self::I16 => (i16::MIN.into(), i16::MAX.into()),
            Self::I32 => (i32::MIN.into(), i32::MAX.into()),
            Self::I64 => (i64::MIN.into(), i64::MAX.into()),
            Self::Isize => (isize::MIN as i128, isize::MAX as i128),
            Self::U8 => (0, u8::MAX.into()),
            Self::U16 => (0, u16::MAX.into()),
            Self::U32 => (0, u32::MAX.into()),
            Self::U64 => (0, u64::MAX.into()),
            Self::Usize => (0, usize::MAX as i128),
        }
    }

    pub fn contains(self, value: i128) -> bool {
        let (low, high) = self.bounds();
        (low..=high).contains(&value)
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatWidth {
    F32,
    #[default]
    F64,
}

impl FloatWidth {
    /// Whether a finite `value` fits this width without overflowing to infinity.
    pub fn contains(self, value: f64) -> bool {
        match self {
            Self::F32 => value.abs() <= f64::from(f32::MAX),
            Self::F64 => value.is_finite(),
        }
    }
}

impl fmt::Display for FloatWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
        }
    }
}
