//! # swaggen compiler
//!
//! This crate turns an OpenAPI/Swagger document describing a controller REST
//! API into client model code: one DTO per model definition, each field
//! tagged with its exact wire key, plus a paired `<Name>APIResponse` list
//! wrapper for every listable resource.
//!
//! ## Architecture
//!
//! ```text
//! IDL document (JSON/YAML)
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Loader    │  Document parsing, $ref resolution
//! │ (doc → graph)│
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Reference & identifier checks
//! │   (graph)    │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Manifest   │  Wire-compatibility lock check
//! │ (graph↔lock) │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Per-model emission, deterministic order
//! │ (graph → Go) │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swaggen_compiler::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     spec_path: "swagger.json".into(),
//!     out_dir: "models".into(),
//!     ..GeneratorConfig::default()
//! };
//!
//! let generator = Generator::new(config);
//! generator.generate()?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod ir;
pub mod loader;
pub mod manifest;
pub mod validate;

pub use config::GeneratorConfig;
pub use diagnostic::GeneratorError;

/// The main generator struct that orchestrates the generation pipeline.
pub struct Generator {
    config: GeneratorConfig,
}

/// Result of a successful generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of model definitions emitted.
    pub models: usize,
    /// Total number of fields across all models.
    pub fields: usize,
    /// Number of derived list-response wrappers.
    pub list_responses: usize,
}

impl Generator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Runs the full pipeline: load, validate, lock check, emit, write.
    ///
    /// Any failure aborts before output is written. All code is generated in
    /// memory first, so a run either produces the complete model set or
    /// nothing at all.
    pub fn generate(&self) -> Result<GenerateResult, GeneratorError> {
        // Phase 1: Load and resolve the schema graph
        let graph = loader::load(&self.config.spec_path)?;

        // Phase 2: Validate references and identifiers
        validate::validate_graph(&graph)?;

        // Phase 3: Wire-compatibility check against the lock file
        if !self.config.skip_lock_check {
            self.check_wire_compat(&graph)?;
        }

        // Phase 4: Generate every model in memory
        let backend = codegen::create_backend(&self.config.language, &self.config.package)?;
        let generated = codegen::generate(&graph, backend.as_ref())?;

        // Phase 5: Write output
        self.write_output(&generated)?;

        Ok(GenerateResult {
            models: graph.models.len(),
            fields: graph.field_count(),
            list_responses: graph.list_count(),
        })
    }

    /// Validates the document without generating code.
    pub fn check(&self) -> Result<(), GeneratorError> {
        let graph = loader::load(&self.config.spec_path)?;
        validate::validate_graph(&graph)
    }

    /// Compare the resolved graph against the lock file.
    ///
    /// - No lock file: write the initial one.
    /// - Breaking changes: abort, unless `force` is set.
    /// - Non-breaking changes: report them and update the lock.
    fn check_wire_compat(&self, graph: &ir::SchemaGraph) -> Result<(), GeneratorError> {
        let lock_path = manifest::lock::default_lock_path(&self.config.spec_path);
        let existing = manifest::ModelsLockFile::load(&lock_path)?;

        let Some(locked) = existing else {
            let lock = manifest::ModelsLockFile::from_graph(graph, env!("CARGO_PKG_VERSION"));
            lock.save(&lock_path)?;
            eprintln!(
                "Generated initial wire-compatibility lock: {}",
                lock_path.display()
            );
            return Ok(());
        };

        let diffs = manifest::diff_graph(&locked.models, graph);
        if diffs.is_empty() {
            return Ok(());
        }

        let breaking: Vec<_> = diffs.iter().filter(|d| d.is_breaking()).collect();
        if !breaking.is_empty() && !self.config.force {
            // Report the first breaking model; one precise error beats a wall.
            let first = breaking[0];
            return Err(GeneratorError::BreakingModelChange {
                model: first.model.clone(),
                changes: first.format_changes(),
            });
        }

        eprintln!("Wire surface changes detected:");
        for diff in &diffs {
            eprintln!("   {}", diff.model);
            eprintln!("{}", diff.format_changes());
        }

        let updated = manifest::ModelsLockFile::from_graph(graph, env!("CARGO_PKG_VERSION"));
        updated.save(&lock_path)?;
        eprintln!("   Updated {}", lock_path.display());

        Ok(())
    }

    /// Writes generated files to the output directory.
    fn write_output(&self, generated: &codegen::GeneratedCode) -> Result<(), GeneratorError> {
        std::fs::create_dir_all(&self.config.out_dir)
            .map_err(|e| GeneratorError::io(&self.config.out_dir, e.to_string()))?;

        for (filename, content) in &generated.files {
            let path = self.config.out_dir.join(filename);
            std::fs::write(&path, content).map_err(|e| GeneratorError::io(path, e.to_string()))?;
        }

        Ok(())
    }
}
