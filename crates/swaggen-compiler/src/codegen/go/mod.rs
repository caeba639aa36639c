//! Go backend: emits `swagger:model` DTO structs with wire-key json tags.

pub mod model;
pub mod types;

use crate::diagnostic::GeneratorError;
use crate::ir::{ModelDef, SchemaGraph};

use super::naming::file_stem;
use super::Backend;

/// The Go code generation backend.
#[derive(Debug)]
pub struct GoBackend {
    /// Package name emitted into every file.
    package: String,
}

impl GoBackend {
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
        }
    }
}

impl Backend for GoBackend {
    fn language(&self) -> &str {
        "go"
    }

    fn file_name(&self, model: &ModelDef) -> String {
        format!("{}.go", file_stem(&model.name))
    }

    fn generate_model(
        &self,
        model: &ModelDef,
        _graph: &SchemaGraph,
    ) -> Result<String, GeneratorError> {
        Ok(model::generate_model(model, &self.package))
    }
}
