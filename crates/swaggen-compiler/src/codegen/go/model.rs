//! Go struct emission for model definitions.

use crate::ir::{FieldDef, IntFormat, ListResponseDef, ModelDef, SchemaType};

use super::super::naming::{exported_ident, humanize};
use super::types::{field_type, json_tag};

/// Emits one self-contained Go source file for a model: the DTO struct and,
/// for listable resources, the paired `<Name>APIResponse` wrapper.
pub fn generate_model(model: &ModelDef, package: &str) -> String {
    let mut out = String::new();

    out.push_str("// Code generated by swaggen. DO NOT EDIT.\n\n");
    out.push_str(&format!("package {}\n\n", package));
    out.push_str(&emit_struct(model));

    if let Some(list) = &model.list {
        out.push('\n');
        out.push_str(&emit_list_response(model, list));
    }

    out
}

fn emit_struct(model: &ModelDef) -> String {
    let ident = exported_ident(&model.name);
    let doc = model
        .description
        .as_deref()
        .map(doc_text)
        .unwrap_or_else(|| humanize(&model.name));

    let mut out = String::new();
    out.push_str(&format!("// {} {}\n", ident, doc));
    out.push_str(&format!("// swagger:model {}\n", ident));
    out.push_str(&format!("type {} struct {{\n", ident));

    for field in &model.fields {
        out.push_str(&emit_member(field));
    }

    out.push_str("}\n");
    out
}

/// The derived list wrapper: `count` (required), `next` (paginated only),
/// `results`. Built from synthetic fields so it flows through the same type
/// mapping as everything else.
fn emit_list_response(model: &ModelDef, list: &ListResponseDef) -> String {
    let base = exported_ident(&model.name);
    let ident = format!("{}APIResponse", base);

    let mut fields = vec![synthetic_field(
        "count",
        SchemaType::Integer(IntFormat::Int32),
        true,
    )];
    if list.paginated {
        fields.push(synthetic_field("next", SchemaType::String, false));
    }
    fields.push(synthetic_field(
        "results",
        SchemaType::Array(Box::new(SchemaType::Reference(model.name.clone()))),
        false,
    ));

    let mut out = String::new();
    out.push_str(&format!(
        "// {} {} API response\n",
        ident,
        humanize(&model.name)
    ));
    out.push_str(&format!("// swagger:model {}\n", ident));
    out.push_str(&format!("type {} struct {{\n", ident));

    for field in &fields {
        out.push_str(&emit_member(field));
    }

    out.push_str("}\n");
    out
}

fn synthetic_field(wire_key: &str, typ: SchemaType, required: bool) -> FieldDef {
    FieldDef {
        wire_key: wire_key.to_string(),
        typ,
        required,
        read_only: false,
        description: None,
        enum_values: Vec::new(),
    }
}

fn emit_member(field: &FieldDef) -> String {
    let mut out = String::new();
    out.push('\n');

    let mut first_line = field
        .description
        .as_deref()
        .map(doc_text)
        .unwrap_or_else(|| field.wire_key.clone());
    if !field.enum_values.is_empty() {
        if !first_line.ends_with('.') {
            first_line.push('.');
        }
        first_line.push_str(&format!(" Enum options - {}.", field.enum_values.join(", ")));
    }
    out.push_str(&format!("\t// {}\n", first_line));

    if field.read_only {
        out.push_str("\t// Read Only: true\n");
    }
    if field.required {
        out.push_str("\t// Required: true\n");
    }

    out.push_str(&format!(
        "\t{} {} {}\n",
        exported_ident(&field.wire_key),
        field_type(field),
        json_tag(field)
    ));
    out
}

/// Collapses a free-text IDL description onto one comment line.
fn doc_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ModelDef {
        let mut model = ModelDef::new("Widget");
        model.fields = vec![
            FieldDef {
                wire_key: "name".to_string(),
                typ: SchemaType::String,
                required: true,
                read_only: false,
                description: Some("Name of the widget.".to_string()),
                enum_values: Vec::new(),
            },
            FieldDef {
                wire_key: "count".to_string(),
                typ: SchemaType::Integer(IntFormat::Int32),
                required: false,
                read_only: false,
                description: None,
                enum_values: Vec::new(),
            },
            FieldDef {
                wire_key: "tags".to_string(),
                typ: SchemaType::Array(Box::new(SchemaType::String)),
                required: false,
                read_only: false,
                description: None,
                enum_values: Vec::new(),
            },
        ];
        model
    }

    #[test]
    fn test_widget_struct_emission() {
        let code = generate_model(&widget(), "models");

        assert!(code.starts_with("// Code generated by swaggen. DO NOT EDIT.\n"));
        assert!(code.contains("package models\n"));
        assert!(code.contains("// swagger:model Widget\n"));
        assert!(code.contains("\tName string `json:\"name\"`\n"));
        assert!(code.contains("\tCount *int32 `json:\"count,omitempty\"`\n"));
        assert!(code.contains("\tTags []string `json:\"tags,omitempty\"`\n"));
    }

    #[test]
    fn test_required_marker_in_docs() {
        let code = generate_model(&widget(), "models");
        let name_block = code.split("\n\n").find(|b| b.contains("Name string")).unwrap();
        assert!(name_block.contains("\t// Required: true\n"));
    }

    #[test]
    fn test_list_response_emission() {
        let mut model = widget();
        model.list = Some(ListResponseDef { paginated: true });
        let code = generate_model(&model, "models");

        assert!(code.contains("// swagger:model WidgetAPIResponse\n"));
        assert!(code.contains("\tCount int32 `json:\"count\"`\n"));
        assert!(code.contains("\tNext *string `json:\"next,omitempty\"`\n"));
        assert!(code.contains("\tResults []*Widget `json:\"results,omitempty\"`\n"));
    }

    #[test]
    fn test_unpaginated_list_has_no_cursor() {
        let mut model = widget();
        model.list = Some(ListResponseDef { paginated: false });
        let code = generate_model(&model, "models");

        assert!(code.contains("WidgetAPIResponse"));
        assert!(!code.contains("Next *string"));
    }

    #[test]
    fn test_enum_and_read_only_are_doc_metadata_only() {
        let mut model = ModelDef::new("Pool");
        model.fields = vec![FieldDef {
            wire_key: "lb_algorithm".to_string(),
            typ: SchemaType::String,
            required: false,
            read_only: true,
            description: Some("Load balancing algorithm".to_string()),
            enum_values: vec!["ROUND_ROBIN".to_string(), "LEAST_CONNECTIONS".to_string()],
        }];

        let code = generate_model(&model, "models");
        assert!(code.contains(
            "\t// Load balancing algorithm. Enum options - ROUND_ROBIN, LEAST_CONNECTIONS.\n"
        ));
        assert!(code.contains("\t// Read Only: true\n"));
        // Still a plain string on the wire.
        assert!(code.contains("\tLbAlgorithm *string `json:\"lb_algorithm,omitempty\"`\n"));
    }

    #[test]
    fn test_emission_is_deterministic() {
        let mut model = widget();
        model.list = Some(ListResponseDef { paginated: true });
        assert_eq!(
            generate_model(&model, "models"),
            generate_model(&model, "models")
        );
    }
}
