//! Cross-model reference validation.
//!
//! References are by name, so cycles between models are legal: they emit as
//! named types and never expand. The one malformed shape is a cycle made
//! entirely of required references, which would embed by value and has no
//! finite representation in the target language.

use std::collections::HashMap;

use crate::diagnostic::GeneratorError;
use crate::ir::{ModelDef, SchemaGraph, SchemaType};

/// Checks that every reference edge resolves to a defined model.
pub fn validate_references(graph: &SchemaGraph) -> Result<(), GeneratorError> {
    for model in graph.models.values() {
        for field in &model.fields {
            if let Some(target) = field.typ.reference_target() {
                if !graph.models.contains_key(target) {
                    return Err(GeneratorError::DanglingRef {
                        model: model.name.clone(),
                        field: field.wire_key.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Rejects cycles of required (by-value) references.
pub fn validate_value_cycles(graph: &SchemaGraph) -> Result<(), GeneratorError> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut stack: Vec<&str> = Vec::new();

    for name in graph.models.keys() {
        visit(graph, name, &mut marks, &mut stack)?;
    }

    Ok(())
}

fn visit<'a>(
    graph: &'a SchemaGraph,
    name: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
) -> Result<(), GeneratorError> {
    match marks.get(name).copied().unwrap_or(Mark::White) {
        Mark::Black => return Ok(()),
        Mark::Gray => {
            let start = stack.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<String> = stack[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(name.to_string());
            return Err(GeneratorError::ByValueReferenceCycle { cycle });
        }
        Mark::White => {}
    }

    marks.insert(name, Mark::Gray);
    stack.push(name);

    if let Some(model) = graph.get(name) {
        for target in required_ref_edges(model) {
            // Dangling targets are reported by the reference check, not here.
            if graph.models.contains_key(target) {
                visit(graph, target, marks, stack)?;
            }
        }
    }

    stack.pop();
    marks.insert(name, Mark::Black);
    Ok(())
}

/// Direct required references only. Arrays introduce indirection (a slice
/// header, not an embedded value), so they can never form a by-value cycle.
fn required_ref_edges(model: &ModelDef) -> impl Iterator<Item = &str> {
    model
        .fields
        .iter()
        .filter(|f| f.required)
        .filter_map(|f| match &f.typ {
            SchemaType::Reference(name) => Some(name.as_str()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FieldDef;
    use std::path::PathBuf;

    fn ref_field(wire_key: &str, target: &str, required: bool) -> FieldDef {
        FieldDef {
            wire_key: wire_key.to_string(),
            typ: SchemaType::Reference(target.to_string()),
            required,
            read_only: false,
            description: None,
            enum_values: Vec::new(),
        }
    }

    fn graph_of(models: Vec<ModelDef>) -> SchemaGraph {
        let mut graph = SchemaGraph::new(PathBuf::from("test.json"));
        for model in models {
            graph.models.insert(model.name.clone(), model);
        }
        graph
    }

    #[test]
    fn test_dangling_ref_is_rejected() {
        let mut a = ModelDef::new("A");
        a.fields.push(ref_field("b_ref", "B", false));

        let err = validate_references(&graph_of(vec![a])).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::DanglingRef { target, .. } if target == "B"
        ));
    }

    #[test]
    fn test_optional_reference_cycle_is_legal() {
        let mut a = ModelDef::new("A");
        a.fields.push(ref_field("b", "B", false));
        let mut b = ModelDef::new("B");
        b.fields.push(ref_field("a", "A", false));

        let graph = graph_of(vec![a, b]);
        assert!(validate_references(&graph).is_ok());
        assert!(validate_value_cycles(&graph).is_ok());
    }

    #[test]
    fn test_required_reference_cycle_is_rejected() {
        let mut a = ModelDef::new("A");
        a.fields.push(ref_field("b", "B", true));
        let mut b = ModelDef::new("B");
        b.fields.push(ref_field("a", "A", true));

        let err = validate_value_cycles(&graph_of(vec![a, b])).unwrap_err();
        assert!(matches!(err, GeneratorError::ByValueReferenceCycle { cycle } if cycle.len() == 3));
    }

    #[test]
    fn test_required_self_reference_is_rejected() {
        let mut a = ModelDef::new("A");
        a.fields.push(ref_field("parent", "A", true));

        let err = validate_value_cycles(&graph_of(vec![a])).unwrap_err();
        assert!(matches!(err, GeneratorError::ByValueReferenceCycle { .. }));
    }

    #[test]
    fn test_cycle_broken_by_optional_edge_is_legal() {
        let mut a = ModelDef::new("A");
        a.fields.push(ref_field("b", "B", true));
        let mut b = ModelDef::new("B");
        b.fields.push(ref_field("a", "A", false));

        assert!(validate_value_cycles(&graph_of(vec![a, b])).is_ok());
    }
}
