//! Generator error types.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during a generation run.
///
/// Every variant is fatal: the run aborts without writing output, because
/// partially generated client models fail much later (at an API call) than
/// a build failure does.
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read or write '{path}': {message}")]
    #[diagnostic(code(swaggen::io::error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Failed to parse IDL document '{}': {message}", path.display())]
    #[diagnostic(code(swaggen::parse::parse_failed))]
    ParseFailed {
        path: PathBuf,
        message: String,
    },

    #[error("Document '{}' declares no supported IDL version", path.display())]
    #[diagnostic(
        code(swaggen::parse::unsupported_document),
        help("Expected a `swagger: \"2.0\"` or `openapi: \"3.x\"` document")
    )]
    UnsupportedDocument {
        path: PathBuf,
    },

    // =========================================================================
    // Schema Errors
    // =========================================================================
    #[error("No model definitions found in '{}'", path.display())]
    #[diagnostic(
        code(swaggen::schema::no_models),
        help("The document must declare models under `definitions` or `components.schemas`")
    )]
    NoModels {
        path: PathBuf,
    },

    #[error("Duplicate model definition: {name}")]
    #[diagnostic(code(swaggen::schema::duplicate_model))]
    DuplicateModel {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Model '{model}' has no fields")]
    #[diagnostic(code(swaggen::schema::empty_model))]
    EmptyModel {
        model: String,
    },

    #[error("Field '{model}.{field}' references undefined model '{target}'")]
    #[diagnostic(
        code(swaggen::schema::dangling_ref),
        help("Every $ref must point at a model defined in the same schema graph")
    )]
    DanglingRef {
        model: String,
        field: String,
        target: String,
    },

    #[error("Collection path '{path}' returns undefined model '{target}'")]
    #[diagnostic(code(swaggen::schema::unknown_path_model))]
    UnknownPathModel {
        path: String,
        target: String,
    },

    #[error("Fields '{first_key}' and '{second_key}' of model '{model}' both normalize to '{ident}'")]
    #[diagnostic(
        code(swaggen::schema::field_name_collision),
        help("Rename one of the wire keys in the IDL; generated identifiers must be unique per model")
    )]
    FieldNameCollision {
        model: String,
        ident: String,
        first_key: String,
        second_key: String,
    },

    #[error("Models {} embed each other by value", cycle.join(" -> "))]
    #[diagnostic(
        code(swaggen::schema::by_value_cycle),
        help("A cycle of required references has no finite representation; make at least one reference optional")
    )]
    ByValueReferenceCycle {
        cycle: Vec<String>,
    },

    // =========================================================================
    // Type Resolution Errors
    // =========================================================================
    #[error("Field '{model}.{field}' declares an inline object type")]
    #[diagnostic(
        code(swaggen::types::inline_object),
        help("Shared sub-objects must be named definitions referenced via $ref, never inlined")
    )]
    InlineObject {
        model: String,
        field: String,
    },

    #[error("Field '{model}.{field}' has unmappable type '{type_name}'")]
    #[diagnostic(code(swaggen::types::unknown_type))]
    UnknownType {
        model: String,
        field: String,
        type_name: String,
    },

    #[error("Field '{model}.{field}' uses unsupported reference '{reference}'")]
    #[diagnostic(
        code(swaggen::types::unsupported_ref),
        help("Only local `#/definitions/...` and `#/components/schemas/...` references are supported")
    )]
    UnsupportedRef {
        model: String,
        field: String,
        reference: String,
    },

    // =========================================================================
    // Wire Compatibility Errors
    // =========================================================================
    #[error("Breaking change to model '{model}':\n{changes}")]
    #[diagnostic(
        code(swaggen::lock::breaking_change),
        help("Breaking changes alter the generated client surface. Re-run with --force or `swaggen lock sync --force` to accept them.")
    )]
    BreakingModelChange {
        model: String,
        changes: String,
    },

    // =========================================================================
    // Backend Errors
    // =========================================================================
    #[error("Unsupported target language: {language}")]
    #[diagnostic(code(swaggen::backend::unsupported_language))]
    UnsupportedLanguage {
        language: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}
