//! Format-agnostic intermediate representation of an IDL document.
//!
//! The IR is produced by the schema loader and consumed by code generation
//! backends. It captures the shape of data exchanged over the API wire in a
//! way that's independent of both the document format (Swagger 2.0,
//! OpenAPI 3.x, JSON, YAML) and the target language.

mod model;

pub use model::{FieldDef, ListResponseDef, ModelDef, SchemaGraph};

/// Integer width, from the IDL `format` modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntFormat {
    Int32,
    Int64,
}

/// Semantic types a field can carry.
///
/// References are always by name, never an inlined copy of the target
/// model. Reference cycles in the schema are therefore representable
/// without special casing.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    String,
    Integer(IntFormat),
    Number,
    Boolean,
    Array(Box<SchemaType>),
    Reference(String),
}

impl SchemaType {
    /// The model name this type refers to, walking through arrays.
    pub fn reference_target(&self) -> Option<&str> {
        match self {
            SchemaType::Reference(name) => Some(name),
            SchemaType::Array(inner) => inner.reference_target(),
            _ => None,
        }
    }
}
