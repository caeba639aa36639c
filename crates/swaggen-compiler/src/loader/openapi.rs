//! OpenAPI/Swagger document parsing and lowering.
//!
//! Handles Swagger 2.0 (`definitions`) and OpenAPI 3.x (`components.schemas`)
//! documents, in JSON or YAML. Both formats lower into the same graph.
//!
//! Property maps deserialize into `serde_json::Map`, which preserves document
//! insertion order; field order in the IDL is wire order and must survive all
//! the way into emitted code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::diagnostic::GeneratorError;
use crate::ir::{FieldDef, IntFormat, ListResponseDef, ModelDef, SchemaGraph, SchemaType};

/// The parts of an IDL document the generator consumes. Everything else in
/// the document is ignored.
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    swagger: Option<String>,
    #[serde(default)]
    openapi: Option<String>,
    #[serde(default)]
    definitions: Option<Map<String, Value>>,
    #[serde(default)]
    components: Option<RawComponents>,
    #[serde(default)]
    paths: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawComponents {
    #[serde(default)]
    schemas: Option<Map<String, Value>>,
}

impl RawDocument {
    /// The model definition map, wherever this document version keeps it.
    fn definitions(&self) -> Option<&Map<String, Value>> {
        self.definitions
            .as_ref()
            .or_else(|| self.components.as_ref().and_then(|c| c.schemas.as_ref()))
    }
}

/// A schema node as it appears in the document.
#[derive(Debug, Default, Deserialize)]
struct RawSchema {
    #[serde(rename = "$ref", default)]
    reference: Option<String>,
    #[serde(rename = "type", default)]
    typ: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    items: Option<Box<RawSchema>>,
    #[serde(rename = "enum", default)]
    enum_values: Vec<Value>,
    #[serde(rename = "readOnly", default)]
    read_only: bool,
}

impl RawSchema {
    /// Enum tokens as display strings, in document order.
    fn enum_tokens(&self) -> Vec<String> {
        self.enum_values
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// GET operation on a path, reduced to what list derivation needs.
#[derive(Debug, Default, Deserialize)]
struct RawOperation {
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(default)]
    responses: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPathItem {
    #[serde(default)]
    get: Option<RawOperation>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

#[derive(Debug, Default, Deserialize)]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(rename = "in", default)]
    location: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawResponse {
    /// Swagger 2.0 response schema.
    #[serde(default)]
    schema: Option<Value>,
    /// OpenAPI 3.x media-type map.
    #[serde(default)]
    content: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMediaType {
    #[serde(default)]
    schema: Option<Value>,
}

/// Reads and parses one IDL document. Pure parse, no graph mutation.
pub fn parse_document(path: &Path) -> Result<RawDocument, GeneratorError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e.to_string()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let doc: RawDocument = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| GeneratorError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| GeneratorError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    if doc.swagger.is_none() && doc.openapi.is_none() {
        return Err(GeneratorError::UnsupportedDocument {
            path: path.to_path_buf(),
        });
    }

    Ok(doc)
}

/// Lowers every model definition of `doc` into the graph.
///
/// `origins` tracks which document first defined each model so duplicate
/// definitions across a merged directory report both locations.
pub fn lower_definitions(
    doc: &RawDocument,
    path: &Path,
    graph: &mut SchemaGraph,
    origins: &mut HashMap<String, PathBuf>,
) -> Result<(), GeneratorError> {
    let Some(defs) = doc.definitions() else {
        return Ok(());
    };

    for (name, value) in defs {
        if let Some(first) = origins.get(name) {
            return Err(GeneratorError::DuplicateModel {
                name: name.clone(),
                first: first.clone(),
                second: path.to_path_buf(),
            });
        }

        let model = lower_model(name, value, path)?;
        origins.insert(name.clone(), path.to_path_buf());
        graph.models.insert(name.clone(), model);
    }

    Ok(())
}

/// Marks models returned by parameter-free GET collection paths as listable.
///
/// The wrapper is paginated when the operation (or its path item) declares a
/// `page` or `page_size` query parameter; only paginated collections carry a
/// `next` cursor in the emitted wrapper.
pub fn derive_list_responses(
    doc: &RawDocument,
    graph: &mut SchemaGraph,
) -> Result<(), GeneratorError> {
    let Some(paths) = &doc.paths else {
        return Ok(());
    };

    for (route, item_value) in paths {
        // Parameterized routes address one object, not a collection.
        if route.contains('{') {
            continue;
        }

        let Ok(item) = serde_json::from_value::<RawPathItem>(item_value.clone()) else {
            continue;
        };
        let Some(get) = &item.get else {
            continue;
        };
        let Some(target) = collection_model(get) else {
            continue;
        };

        let paginated = item
            .parameters
            .iter()
            .chain(get.parameters.iter())
            .any(is_page_param);

        match graph.models.get_mut(&target) {
            Some(model) => model.list = Some(ListResponseDef { paginated }),
            None => {
                return Err(GeneratorError::UnknownPathModel {
                    path: route.clone(),
                    target,
                });
            }
        }
    }

    Ok(())
}

/// The model a collection GET resolves to, directly or via `array.items`.
fn collection_model(op: &RawOperation) -> Option<String> {
    let response: RawResponse = serde_json::from_value(op.responses.get("200")?.clone()).ok()?;

    let schema_value = match (&response.schema, &response.content) {
        (Some(schema), _) => schema.clone(),
        (None, Some(content)) => {
            let media: RawMediaType =
                serde_json::from_value(content.get("application/json")?.clone()).ok()?;
            media.schema?
        }
        (None, None) => return None,
    };

    let schema: RawSchema = serde_json::from_value(schema_value).ok()?;
    let target = match (&schema.reference, schema.typ.as_deref(), &schema.items) {
        (Some(reference), _, _) => ref_target(reference)?,
        (None, Some("array"), Some(items)) => ref_target(items.reference.as_deref()?)?,
        _ => return None,
    };

    Some(target.to_string())
}

fn is_page_param(param: &RawParameter) -> bool {
    param.location == "query" && (param.name == "page" || param.name == "page_size")
}

/// Lowers one named definition into a model.
fn lower_model(name: &str, value: &Value, path: &Path) -> Result<ModelDef, GeneratorError> {
    let raw = parse_schema(value, path)?;

    let mut model = ModelDef::new(name);
    model.description = raw.description.clone();

    if let Some(properties) = &raw.properties {
        for (key, prop_value) in properties {
            let prop = parse_schema(prop_value, path)?;
            let typ = lower_type(name, key, &prop)?;

            model.fields.push(FieldDef {
                wire_key: key.clone(),
                typ,
                required: raw.required.iter().any(|r| r == key),
                read_only: prop.read_only,
                description: prop.description.clone(),
                enum_values: prop.enum_tokens(),
            });
        }
    }

    Ok(model)
}

fn parse_schema(value: &Value, path: &Path) -> Result<RawSchema, GeneratorError> {
    serde_json::from_value(value.clone()).map_err(|e| GeneratorError::ParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolves a field schema to its semantic type.
///
/// References stay references: a `$ref` becomes a named edge, never a copy
/// of the target definition. Inline object types are rejected outright so
/// shared sub-objects cannot sneak in as anonymous duplicates.
fn lower_type(model: &str, field: &str, schema: &RawSchema) -> Result<SchemaType, GeneratorError> {
    if let Some(reference) = &schema.reference {
        return match ref_target(reference) {
            Some(target) => Ok(SchemaType::Reference(target.to_string())),
            None => Err(GeneratorError::UnsupportedRef {
                model: model.to_string(),
                field: field.to_string(),
                reference: reference.clone(),
            }),
        };
    }

    if schema.properties.is_some() {
        return Err(GeneratorError::InlineObject {
            model: model.to_string(),
            field: field.to_string(),
        });
    }

    match schema.typ.as_deref() {
        Some("string") => Ok(SchemaType::String),
        Some("integer") => Ok(SchemaType::Integer(int_format(schema))),
        Some("number") => Ok(SchemaType::Number),
        Some("boolean") => Ok(SchemaType::Boolean),
        Some("array") => match &schema.items {
            Some(items) => Ok(SchemaType::Array(Box::new(lower_type(
                model, field, items,
            )?))),
            None => Err(GeneratorError::UnknownType {
                model: model.to_string(),
                field: field.to_string(),
                type_name: "array without items".to_string(),
            }),
        },
        Some(other) => Err(GeneratorError::UnknownType {
            model: model.to_string(),
            field: field.to_string(),
            type_name: other.to_string(),
        }),
        None => Err(GeneratorError::UnknownType {
            model: model.to_string(),
            field: field.to_string(),
            type_name: "(untyped)".to_string(),
        }),
    }
}

fn int_format(schema: &RawSchema) -> IntFormat {
    match schema.format.as_deref() {
        Some("int64") => IntFormat::Int64,
        _ => IntFormat::Int32,
    }
}

/// Strips the local-reference prefix, for both document versions.
fn ref_target(reference: &str) -> Option<&str> {
    let target = reference
        .strip_prefix("#/definitions/")
        .or_else(|| reference.strip_prefix("#/components/schemas/"))?;

    if target.is_empty() || target.contains('/') {
        return None;
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: &str) -> RawSchema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ref_target() {
        assert_eq!(ref_target("#/definitions/IPAddr"), Some("IPAddr"));
        assert_eq!(ref_target("#/components/schemas/IPAddr"), Some("IPAddr"));
        assert_eq!(ref_target("external.json#/definitions/IPAddr"), None);
        assert_eq!(ref_target("#/definitions/"), None);
    }

    #[test]
    fn test_lower_primitive_types() {
        assert_eq!(
            lower_type("M", "f", &schema(r#"{"type": "string"}"#)).unwrap(),
            SchemaType::String
        );
        assert_eq!(
            lower_type("M", "f", &schema(r#"{"type": "integer"}"#)).unwrap(),
            SchemaType::Integer(IntFormat::Int32)
        );
        assert_eq!(
            lower_type(
                "M",
                "f",
                &schema(r#"{"type": "integer", "format": "int64"}"#)
            )
            .unwrap(),
            SchemaType::Integer(IntFormat::Int64)
        );
        assert_eq!(
            lower_type("M", "f", &schema(r#"{"type": "number"}"#)).unwrap(),
            SchemaType::Number
        );
        assert_eq!(
            lower_type("M", "f", &schema(r#"{"type": "boolean"}"#)).unwrap(),
            SchemaType::Boolean
        );
    }

    #[test]
    fn test_lower_nested_array_of_refs() {
        let typ = lower_type(
            "M",
            "f",
            &schema(r##"{"type": "array", "items": {"$ref": "#/definitions/IPAddr"}}"##),
        )
        .unwrap();
        assert_eq!(
            typ,
            SchemaType::Array(Box::new(SchemaType::Reference("IPAddr".to_string())))
        );
    }

    #[test]
    fn test_inline_object_is_rejected() {
        let err = lower_type(
            "M",
            "f",
            &schema(r#"{"type": "object", "properties": {"x": {"type": "string"}}}"#),
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::InlineObject { .. }));
    }

    #[test]
    fn test_untyped_field_is_rejected() {
        let err = lower_type("M", "f", &schema(r#"{"description": "mystery"}"#)).unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownType { .. }));
    }

    #[test]
    fn test_enum_tokens_stay_strings() {
        let s = schema(
            r#"{"type": "string", "enum": ["ROUND_ROBIN", "LEAST_CONNECTIONS"], "readOnly": true}"#,
        );
        assert_eq!(
            s.enum_tokens(),
            vec!["ROUND_ROBIN".to_string(), "LEAST_CONNECTIONS".to_string()]
        );
        assert!(s.read_only);
        assert_eq!(lower_type("M", "f", &s).unwrap(), SchemaType::String);
    }
}
