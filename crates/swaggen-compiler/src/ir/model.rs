//! Model definitions and the resolved schema graph.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::SchemaType;

/// One field of a model definition.
///
/// The wire key is the exact JSON property name from the IDL; it is carried
/// unchanged into the emitted serialization metadata so documents round-trip
/// byte-for-byte regardless of the target language's identifier convention.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub wire_key: String,
    pub typ: SchemaType,
    pub required: bool,
    pub read_only: bool,
    pub description: Option<String>,
    /// Allowed value tokens, carried as documentation only. Enum fields stay
    /// plain strings on the wire so a server that starts sending a new token
    /// does not break an older client.
    pub enum_values: Vec<String>,
}

/// Derivation marker for the paired list-response wrapper.
///
/// Mechanically derived when a model is exposed as a top-level listable
/// resource; never hand-authored in the IDL.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponseDef {
    /// Paginated collections additionally carry a `next` cursor.
    pub paginated: bool,
}

/// A named model definition: one API-exchanged object.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDef {
    pub name: String,
    pub description: Option<String>,
    /// Fields in IDL insertion order. Order is wire order and dictates the
    /// order of emitted members.
    pub fields: Vec<FieldDef>,
    pub list: Option<ListResponseDef>,
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            list: None,
        }
    }
}

/// The fully resolved model graph for one generation run.
///
/// Models are stored by name in a `BTreeMap` so iteration is lexicographic,
/// which keeps emission order (and therefore regeneration diffs) stable.
/// The graph is built once by the loader and treated as immutable read-only
/// state afterwards; nothing persists across runs.
#[derive(Debug)]
pub struct SchemaGraph {
    pub models: BTreeMap<String, ModelDef>,
    /// The document (or document directory) this graph was loaded from.
    pub source: PathBuf,
}

impl SchemaGraph {
    pub fn new(source: PathBuf) -> Self {
        Self {
            models: BTreeMap::new(),
            source,
        }
    }

    /// Looks up a model by name.
    pub fn get(&self, name: &str) -> Option<&ModelDef> {
        self.models.get(name)
    }

    /// Total number of fields across all models.
    pub fn field_count(&self) -> usize {
        self.models.values().map(|m| m.fields.len()).sum()
    }

    /// Number of models that get a derived list-response wrapper.
    pub fn list_count(&self) -> usize {
        self.models.values().filter(|m| m.list.is_some()).count()
    }
}
