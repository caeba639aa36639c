//! Generator configuration.

use std::path::PathBuf;

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// IDL document, or a directory of documents merged into one graph.
    pub spec_path: PathBuf,

    /// Directory to write generated model files.
    pub out_dir: PathBuf,

    /// Target language (default: "go").
    pub language: String,

    /// Package name emitted into generated files.
    pub package: String,

    /// Skip the wire-compatibility lock check (for testing).
    pub skip_lock_check: bool,

    /// Accept breaking wire-surface changes and update the lock file.
    pub force: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spec_path: PathBuf::from("swagger.json"),
            out_dir: PathBuf::from("models"),
            language: "go".to_string(),
            package: "models".to_string(),
            skip_lock_check: false,
            force: false,
        }
    }
}
