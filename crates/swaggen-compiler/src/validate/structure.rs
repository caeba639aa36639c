//! Per-model structure validation.

use std::collections::HashMap;

use crate::codegen::naming::exported_ident;
use crate::diagnostic::GeneratorError;
use crate::ir::SchemaGraph;

/// Validates every model's shape and generated identifiers.
pub fn validate_structure(graph: &SchemaGraph) -> Result<(), GeneratorError> {
    for model in graph.models.values() {
        if model.fields.is_empty() {
            return Err(GeneratorError::EmptyModel {
                model: model.name.clone(),
            });
        }

        // Two wire keys normalizing to the same identifier would emit a
        // struct that doesn't compile; catch it here with both keys named.
        let mut seen: HashMap<String, &str> = HashMap::new();
        for field in &model.fields {
            let ident = exported_ident(&field.wire_key);
            if let Some(first_key) = seen.get(ident.as_str()) {
                return Err(GeneratorError::FieldNameCollision {
                    model: model.name.clone(),
                    ident,
                    first_key: (*first_key).to_string(),
                    second_key: field.wire_key.clone(),
                });
            }
            seen.insert(ident, &field.wire_key);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FieldDef, ModelDef, SchemaType};
    use std::path::PathBuf;

    fn field(wire_key: &str) -> FieldDef {
        FieldDef {
            wire_key: wire_key.to_string(),
            typ: SchemaType::String,
            required: false,
            read_only: false,
            description: None,
            enum_values: Vec::new(),
        }
    }

    fn graph_of(model: ModelDef) -> SchemaGraph {
        let mut graph = SchemaGraph::new(PathBuf::from("test.json"));
        graph.models.insert(model.name.clone(), model);
        graph
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let err = validate_structure(&graph_of(ModelDef::new("Empty"))).unwrap_err();
        assert!(matches!(err, GeneratorError::EmptyModel { model } if model == "Empty"));
    }

    #[test]
    fn test_identifier_collision_is_rejected() {
        let mut model = ModelDef::new("Addr");
        model.fields.push(field("ip_addr"));
        model.fields.push(field("IPAddr"));

        let err = validate_structure(&graph_of(model)).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::FieldNameCollision { ident, .. } if ident == "IPAddr"
        ));
    }

    #[test]
    fn test_distinct_fields_pass() {
        let mut model = ModelDef::new("Addr");
        model.fields.push(field("ip_addr"));
        model.fields.push(field("mask"));

        assert!(validate_structure(&graph_of(model)).is_ok());
    }
}
