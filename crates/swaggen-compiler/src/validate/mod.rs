//! Validation of the resolved schema graph.

mod refs;
mod structure;

use crate::diagnostic::GeneratorError;
use crate::ir::SchemaGraph;

/// Validates the entire graph before any code is generated.
pub fn validate_graph(graph: &SchemaGraph) -> Result<(), GeneratorError> {
    // Per-model shape and identifier checks
    structure::validate_structure(graph)?;

    // Cross-model reference checks
    refs::validate_references(graph)?;
    refs::validate_value_cycles(graph)?;

    Ok(())
}
