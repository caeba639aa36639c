//! Code generation from the resolved schema graph.
//!
//! Backends are pluggable per target language; each one turns a model
//! definition into a self-contained source unit. The driver in this module
//! guarantees the ordering and all-or-nothing properties: models emit in
//! lexicographic name order, and everything is generated in memory before a
//! single byte reaches disk.

pub mod naming;

pub mod go;

use crate::diagnostic::GeneratorError;
use crate::ir::{ModelDef, SchemaGraph};

/// Generated source files: (relative filename, content).
pub struct GeneratedCode {
    pub files: Vec<(String, String)>,
}

/// Trait for target-language backends.
pub trait Backend: std::fmt::Debug {
    /// Returns the language name (e.g., "go").
    fn language(&self) -> &str;

    /// Output filename for one model.
    fn file_name(&self, model: &ModelDef) -> String;

    /// Emits the source unit for one model. Fails fast on the first field
    /// whose type cannot be rendered; the driver aborts the whole run.
    fn generate_model(
        &self,
        model: &ModelDef,
        graph: &SchemaGraph,
    ) -> Result<String, GeneratorError>;
}

/// Creates a backend for the given target language selector.
pub fn create_backend(language: &str, package: &str) -> Result<Box<dyn Backend>, GeneratorError> {
    match language {
        "go" | "golang" => Ok(Box::new(go::GoBackend::new(package))),
        _ => Err(GeneratorError::UnsupportedLanguage {
            language: language.to_string(),
        }),
    }
}

/// Generates one output unit per model across the whole graph.
pub fn generate(
    graph: &SchemaGraph,
    backend: &dyn Backend,
) -> Result<GeneratedCode, GeneratorError> {
    let mut files = Vec::new();

    // BTreeMap iteration is lexicographic by model name, which keeps
    // regeneration diffs minimal and reviewable.
    for model in graph.models.values() {
        let content = backend.generate_model(model, graph)?;
        files.push((backend.file_name(model), content));
    }

    Ok(GeneratedCode { files })
}
