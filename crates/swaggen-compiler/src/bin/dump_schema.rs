//! Debug script to see what the loader resolves from a document.

use std::path::PathBuf;

use swaggen_compiler::loader;
use swaggen_compiler::manifest::type_to_string;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("swagger.json"));

    match loader::load(&path) {
        Ok(graph) => {
            println!("Resolved {} model(s) from {:?}", graph.models.len(), graph.source);
            for model in graph.models.values() {
                let list = match &model.list {
                    Some(l) if l.paginated => " [listable, paginated]",
                    Some(_) => " [listable]",
                    None => "",
                };
                println!("\n{}{}", model.name, list);
                for field in &model.fields {
                    let req = if field.required { " (required)" } else { "" };
                    println!("  {}: {}{}", field.wire_key, type_to_string(&field.typ), req);
                }
            }
        }
        Err(e) => {
            println!("Error: {:?}", e);
        }
    }
}
