//! Go type expressions from semantic field types.

use crate::ir::{FieldDef, IntFormat, SchemaType};

use super::super::naming::exported_ident;

/// Converts a SchemaType to its bare Go type expression.
pub fn go_type(typ: &SchemaType) -> String {
    match typ {
        SchemaType::String => "string".to_string(),
        SchemaType::Integer(IntFormat::Int32) => "int32".to_string(),
        SchemaType::Integer(IntFormat::Int64) => "int64".to_string(),
        SchemaType::Number => "float64".to_string(),
        SchemaType::Boolean => "bool".to_string(),
        SchemaType::Array(inner) => format!("[]{}", element_type(inner)),
        SchemaType::Reference(name) => exported_ident(name),
    }
}

/// Array element expression. Referenced models become pointer elements so a
/// missing object in a results array decodes as nil rather than a zero value.
fn element_type(inner: &SchemaType) -> String {
    match inner {
        SchemaType::Reference(name) => format!("*{}", exported_ident(name)),
        other => go_type(other),
    }
}

/// The member type for a field, with optionality applied.
///
/// Only `required: true` produces a value type. Every other field is a
/// pointer so that "absent" and "present with zero value" stay distinct on
/// the wire — including fields that are logically always-present counters;
/// the IDL's required flag is the only non-optional signal and this mapping
/// replicates it exactly. Slices are already nilable, so optional arrays
/// stay bare slices.
pub fn field_type(field: &FieldDef) -> String {
    let base = go_type(&field.typ);
    if field.required || matches!(field.typ, SchemaType::Array(_)) {
        base
    } else {
        format!("*{}", base)
    }
}

/// The serialization tag carrying the exact wire key.
pub fn json_tag(field: &FieldDef) -> String {
    if field.required {
        format!("`json:\"{}\"`", field.wire_key)
    } else {
        format!("`json:\"{},omitempty\"`", field.wire_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(wire_key: &str, typ: SchemaType, required: bool) -> FieldDef {
        FieldDef {
            wire_key: wire_key.to_string(),
            typ,
            required,
            read_only: false,
            description: None,
            enum_values: Vec::new(),
        }
    }

    #[test]
    fn test_primitive_types() {
        assert_eq!(go_type(&SchemaType::String), "string");
        assert_eq!(go_type(&SchemaType::Integer(IntFormat::Int32)), "int32");
        assert_eq!(go_type(&SchemaType::Integer(IntFormat::Int64)), "int64");
        assert_eq!(go_type(&SchemaType::Number), "float64");
        assert_eq!(go_type(&SchemaType::Boolean), "bool");
    }

    #[test]
    fn test_array_types() {
        assert_eq!(
            go_type(&SchemaType::Array(Box::new(SchemaType::String))),
            "[]string"
        );
        assert_eq!(
            go_type(&SchemaType::Array(Box::new(SchemaType::Reference(
                "IPAddr".to_string()
            )))),
            "[]*IPAddr"
        );
    }

    #[test]
    fn test_required_fields_are_value_types() {
        let f = field("name", SchemaType::String, true);
        assert_eq!(field_type(&f), "string");
        assert_eq!(json_tag(&f), "`json:\"name\"`");
    }

    #[test]
    fn test_optional_fields_are_pointers() {
        let f = field("count", SchemaType::Integer(IntFormat::Int32), false);
        assert_eq!(field_type(&f), "*int32");
        assert_eq!(json_tag(&f), "`json:\"count,omitempty\"`");
    }

    #[test]
    fn test_optional_arrays_stay_slices() {
        let f = field(
            "tags",
            SchemaType::Array(Box::new(SchemaType::String)),
            false,
        );
        assert_eq!(field_type(&f), "[]string");
        assert_eq!(json_tag(&f), "`json:\"tags,omitempty\"`");
    }

    #[test]
    fn test_reference_fields() {
        let optional = field("ip_addr", SchemaType::Reference("IPAddr".to_string()), false);
        assert_eq!(field_type(&optional), "*IPAddr");

        let required = field("ip_addr", SchemaType::Reference("IPAddr".to_string()), true);
        assert_eq!(field_type(&required), "IPAddr");
    }
}
