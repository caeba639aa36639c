//! IDL document loading.
//!
//! A load accepts either a single OpenAPI/Swagger document or a directory of
//! per-resource documents. Directory mode merges every discovered document
//! into one schema graph, so controllers that ship one swagger file per
//! object category still resolve cross-document references by name.

pub mod openapi;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostic::GeneratorError;
use crate::ir::SchemaGraph;

/// File extensions treated as IDL documents during directory discovery.
const EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Loads and resolves the schema graph from a document or document directory.
pub fn load(path: &Path) -> Result<SchemaGraph, GeneratorError> {
    let documents = discover(path)?;

    let mut parsed = Vec::with_capacity(documents.len());
    for doc_path in documents {
        let doc = openapi::parse_document(&doc_path)?;
        parsed.push((doc_path, doc));
    }

    // Pass 1: model definitions from every document.
    let mut graph = SchemaGraph::new(path.to_path_buf());
    let mut origins: HashMap<String, PathBuf> = HashMap::new();
    for (doc_path, doc) in &parsed {
        openapi::lower_definitions(doc, doc_path, &mut graph, &mut origins)?;
    }

    if graph.models.is_empty() {
        return Err(GeneratorError::NoModels {
            path: path.to_path_buf(),
        });
    }

    // Pass 2: list-response derivation from every document's paths. A path
    // may return a model defined in a different document, so this runs only
    // once all definitions are in.
    for (_, doc) in &parsed {
        openapi::derive_list_responses(doc, &mut graph)?;
    }

    Ok(graph)
}

/// Discovers IDL documents under `path`.
fn discover(path: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(GeneratorError::io(path, "no such file or directory"));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if p.is_file() {
            if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                if EXTENSIONS.contains(&ext) {
                    found.push(p.to_path_buf());
                }
            }
        }
    }

    // Lexicographic order keeps merge order, and therefore duplicate-model
    // attribution, stable across runs.
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IntFormat, SchemaType};
    use tempfile::TempDir;

    const WIDGET_DOC: &str = r##"{
        "swagger": "2.0",
        "info": {"title": "widgets", "version": "1.0"},
        "paths": {
            "/widget": {
                "get": {
                    "parameters": [
                        {"name": "page", "in": "query", "type": "integer"}
                    ],
                    "responses": {
                        "200": {
                            "schema": {
                                "type": "array",
                                "items": {"$ref": "#/definitions/Widget"}
                            }
                        }
                    }
                }
            },
            "/widget/{uuid}": {
                "get": {
                    "responses": {
                        "200": {"schema": {"$ref": "#/definitions/Widget"}}
                    }
                }
            }
        },
        "definitions": {
            "Widget": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"},
                    "count": {"type": "integer"},
                    "tags": {"type": "array", "items": {"type": "string"}}
                }
            }
        }
    }"##;

    fn write_doc(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_single_document() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "widgets.json", WIDGET_DOC);

        let graph = load(&path).unwrap();
        let widget = graph.get("Widget").unwrap();

        assert_eq!(widget.fields.len(), 3);
        assert_eq!(widget.fields[0].wire_key, "name");
        assert!(widget.fields[0].required);
        assert_eq!(widget.fields[1].wire_key, "count");
        assert!(!widget.fields[1].required);
        assert_eq!(widget.fields[1].typ, SchemaType::Integer(IntFormat::Int32));
        assert_eq!(
            widget.fields[2].typ,
            SchemaType::Array(Box::new(SchemaType::String))
        );
    }

    #[test]
    fn test_collection_path_derives_paginated_list() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "widgets.json", WIDGET_DOC);

        let graph = load(&path).unwrap();
        let list = graph.get("Widget").unwrap().list.as_ref().unwrap();
        assert!(list.paginated);
        assert_eq!(graph.list_count(), 1);
    }

    #[test]
    fn test_directory_merge() {
        let dir = TempDir::new().unwrap();
        write_doc(
            &dir,
            "a.json",
            r##"{"swagger": "2.0", "definitions": {"Alpha": {
                "type": "object",
                "properties": {"beta_ref": {"$ref": "#/definitions/Beta"}}
            }}}"##,
        );
        write_doc(
            &dir,
            "b.json",
            r#"{"swagger": "2.0", "definitions": {"Beta": {
                "type": "object",
                "properties": {"value": {"type": "string"}}
            }}}"#,
        );

        let graph = load(dir.path()).unwrap();
        assert_eq!(graph.models.len(), 2);
        assert_eq!(
            graph.get("Alpha").unwrap().fields[0].typ,
            SchemaType::Reference("Beta".to_string())
        );
    }

    #[test]
    fn test_duplicate_model_across_documents() {
        let dir = TempDir::new().unwrap();
        let doc = r#"{"swagger": "2.0", "definitions": {"Alpha": {
            "type": "object", "properties": {"value": {"type": "string"}}
        }}}"#;
        write_doc(&dir, "a.json", doc);
        write_doc(&dir, "b.json", doc);

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateModel { name, .. } if name == "Alpha"));
    }

    #[test]
    fn test_yaml_document_parses_like_json() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "widgets.yaml",
            r#"
swagger: "2.0"
definitions:
  Widget:
    type: object
    required: [name]
    properties:
      name:
        type: string
      count:
        type: integer
        format: int64
"#,
        );

        let graph = load(&path).unwrap();
        let widget = graph.get("Widget").unwrap();
        assert_eq!(widget.fields[0].wire_key, "name");
        assert_eq!(widget.fields[1].typ, SchemaType::Integer(IntFormat::Int64));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "empty.json", r#"{"swagger": "2.0"}"#);

        let err = load(&path).unwrap_err();
        assert!(matches!(err, GeneratorError::NoModels { .. }));
    }
}
