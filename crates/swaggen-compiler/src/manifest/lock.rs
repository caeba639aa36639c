//! Lock file types and serialization.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::GeneratorError;
use crate::ir::{IntFormat, ModelDef, SchemaGraph, SchemaType};

/// The lock file format version.
pub const LOCK_FILE_VERSION: &str = "1.0";

/// Default lock file name, written next to the IDL document.
pub const LOCK_FILE_NAME: &str = "models.lock.json";

/// The complete lock file.
///
/// Maps are `BTreeMap` so serialization order is stable and the lock file
/// itself regenerates byte-identically from an unchanged graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsLockFile {
    /// Lock file format version.
    pub version: String,

    /// Generator version that wrote this file.
    #[serde(rename = "generatorVersion")]
    pub generator_version: String,

    /// Wire surface per model.
    pub models: BTreeMap<String, ModelLock>,
}

/// Lock entry for a single model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLock {
    /// Field surface keyed by wire key.
    pub fields: BTreeMap<String, FieldLock>,

    /// Content hash for quick comparison.
    pub hash: String,
}

/// Lock entry for a single field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldLock {
    /// Semantic type representation.
    #[serde(rename = "type")]
    pub typ: String,

    /// Whether the field is required (emitted as a value type).
    pub required: bool,
}

impl ModelsLockFile {
    /// Load a lock file from disk.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Option<Self>, GeneratorError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GeneratorError::io(path, e.to_string()))?;

        let lock_file: Self = serde_json::from_str(&content).map_err(|e| {
            GeneratorError::io(path, format!("Failed to parse lock file: {}", e))
        })?;

        Ok(Some(lock_file))
    }

    /// Save the lock file to disk.
    pub fn save(&self, path: &Path) -> Result<(), GeneratorError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GeneratorError::io(parent, e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| GeneratorError::io(path, format!("Failed to serialize lock file: {}", e)))?;

        std::fs::write(path, content).map_err(|e| GeneratorError::io(path, e.to_string()))?;

        Ok(())
    }

    /// Generate a lock file from the resolved graph.
    pub fn from_graph(graph: &SchemaGraph, generator_version: &str) -> Self {
        let mut models = BTreeMap::new();

        for model in graph.models.values() {
            models.insert(model.name.clone(), ModelLock::from_model(model));
        }

        Self {
            version: LOCK_FILE_VERSION.to_string(),
            generator_version: generator_version.to_string(),
            models,
        }
    }
}

impl ModelLock {
    fn from_model(model: &ModelDef) -> Self {
        let mut fields = BTreeMap::new();

        for field in &model.fields {
            fields.insert(
                field.wire_key.clone(),
                FieldLock {
                    typ: type_to_string(&field.typ),
                    required: field.required,
                },
            );
        }

        let hash = compute_hash(&model.name, &fields);
        Self { fields, hash }
    }
}

/// Default lock path: sibling of the IDL document (or document directory).
pub fn default_lock_path(spec_path: &Path) -> PathBuf {
    spec_path
        .parent()
        .unwrap_or(spec_path)
        .join(LOCK_FILE_NAME)
}

/// Compact type representation used in lock entries and diff output.
pub fn type_to_string(typ: &SchemaType) -> String {
    match typ {
        SchemaType::String => "string".to_string(),
        SchemaType::Integer(IntFormat::Int32) => "int32".to_string(),
        SchemaType::Integer(IntFormat::Int64) => "int64".to_string(),
        SchemaType::Number => "number".to_string(),
        SchemaType::Boolean => "boolean".to_string(),
        SchemaType::Array(inner) => format!("{}[]", type_to_string(inner)),
        SchemaType::Reference(name) => name.clone(),
    }
}

/// Content hash over the model's wire surface.
fn compute_hash(model_name: &str, fields: &BTreeMap<String, FieldLock>) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    model_name.hash(&mut hasher);
    for (key, lock) in fields {
        key.hash(&mut hasher);
        lock.typ.hash(&mut hasher);
        lock.required.hash(&mut hasher);
    }

    format!("{:016x}", hasher.finish())
}
