//! swaggen CLI.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};

use swaggen_compiler::{Generator, GeneratorConfig};

mod ui;

#[derive(Parser)]
#[command(name = "swaggen")]
#[command(about = "swaggen - generates client model code from OpenAPI/Swagger schemas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client models from an IDL document
    Generate {
        /// IDL document, or a directory of documents merged into one graph
        #[arg(short, long, default_value = "swagger.json")]
        spec: PathBuf,

        /// Output directory for generated model files
        #[arg(short, long, default_value = "models")]
        output: PathBuf,

        /// Target language
        #[arg(short, long, default_value = "go")]
        language: String,

        /// Package name emitted into generated files
        #[arg(short, long, default_value = "models")]
        package: String,

        /// Skip the wire-compatibility lock check
        #[arg(long)]
        skip_lock_check: bool,

        /// Accept breaking wire-surface changes and update the lock file
        #[arg(long)]
        force: bool,
    },

    /// Check an IDL document without generating code
    Check {
        /// IDL document, or a directory of documents
        #[arg(short, long, default_value = "swagger.json")]
        spec: PathBuf,
    },

    /// Watch the IDL document and regenerate on changes
    Watch {
        /// IDL document, or a directory of documents
        #[arg(short, long, default_value = "swagger.json")]
        spec: PathBuf,

        /// Output directory for generated model files
        #[arg(short, long, default_value = "models")]
        output: PathBuf,

        /// Target language
        #[arg(short, long, default_value = "go")]
        language: String,

        /// Package name emitted into generated files
        #[arg(short, long, default_value = "models")]
        package: String,
    },

    /// Wire-compatibility lock management
    Lock {
        #[command(subcommand)]
        action: LockAction,
    },
}

/// Lock management subcommands.
#[derive(Subcommand)]
enum LockAction {
    /// Show lock status against the current document
    Status {
        /// IDL document, or a directory of documents
        #[arg(short, long, default_value = "swagger.json")]
        spec: PathBuf,
    },

    /// Generate or update the lock file
    Sync {
        /// IDL document, or a directory of documents
        #[arg(short, long, default_value = "swagger.json")]
        spec: PathBuf,

        /// Force sync even with breaking changes (dangerous!)
        #[arg(long)]
        force: bool,
    },

    /// Show diff between the current document and the lock file
    Diff {
        /// IDL document, or a directory of documents
        #[arg(short, long, default_value = "swagger.json")]
        spec: PathBuf,
    },

    /// Delete the lock file (requires explicit confirmation)
    Reset {
        /// IDL document, or a directory of documents
        #[arg(short, long, default_value = "swagger.json")]
        spec: PathBuf,

        /// I understand regenerations lose their compatibility guard
        #[arg(long)]
        i_know_what_im_doing: bool,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            spec,
            output,
            language,
            package,
            skip_lock_check,
            force,
        } => {
            run_generate(&spec, &output, &language, &package, skip_lock_check, force)?;
        }

        Commands::Check { spec } => {
            run_check(&spec)?;
        }

        Commands::Watch {
            spec,
            output,
            language,
            package,
        } => {
            run_watch_mode(&spec, &output, &language, &package).await?;
        }

        Commands::Lock { action } => {
            handle_lock_command(action)?;
        }
    }

    Ok(())
}

/// Generate models and print a summary.
fn run_generate(
    spec: &PathBuf,
    output: &PathBuf,
    language: &str,
    package: &str,
    skip_lock_check: bool,
    force: bool,
) -> miette::Result<()> {
    let start = Instant::now();
    let spinner = ui::spinner("Generating client models...");

    let config = GeneratorConfig {
        spec_path: spec.clone(),
        out_dir: output.clone(),
        language: language.to_string(),
        package: package.to_string(),
        skip_lock_check,
        force,
    };

    let generator = Generator::new(config);
    let result = match generator.generate() {
        Ok(result) => {
            spinner.finish_and_clear();
            result
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            return Err(e.into());
        }
    };

    // Model summary
    ui::box_header("MODELS");
    ui::box_line("");

    let graph = swaggen_compiler::loader::load(spec)?;
    let max_fields = graph
        .models
        .values()
        .map(|m| m.fields.len())
        .max()
        .unwrap_or(1);

    for model in graph.models.values() {
        ui::model_line(
            &model.name,
            model.fields.len(),
            model.list.is_some(),
            max_fields,
        );
    }

    ui::box_line("");
    ui::box_footer();
    println!();

    ui::success(&format!(
        "{} models {} {} fields {} {} list responses {} {}",
        result.models,
        ui::symbols::DOT,
        result.fields,
        ui::symbols::DOT,
        result.list_responses,
        ui::symbols::ARROW,
        output.display()
    ));

    let duration = start.elapsed().as_millis();
    ui::timing("Done", duration);
    println!();

    Ok(())
}

/// Check the document without generating code.
fn run_check(spec: &PathBuf) -> miette::Result<()> {
    let spinner = ui::spinner("Checking schemas...");

    let config = GeneratorConfig {
        spec_path: spec.clone(),
        ..GeneratorConfig::default()
    };

    let generator = Generator::new(config);

    // Get stats by loading
    let graph = match swaggen_compiler::loader::load(spec) {
        Ok(graph) => graph,
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            return Err(e.into());
        }
    };

    match generator.check() {
        Ok(_) => {
            spinner.finish_and_clear();
            ui::looking_good();
            println!();
            println!(
                "    {} models {} {} fields {} {} listable",
                graph.models.len(),
                ui::symbols::DOT,
                graph.field_count(),
                ui::symbols::DOT,
                graph.list_count()
            );
            println!("    Every reference resolves. Ready to generate.");
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            return Err(e.into());
        }
    }

    Ok(())
}

/// Watch the document and regenerate on changes.
async fn run_watch_mode(
    spec: &std::path::Path,
    output: &std::path::Path,
    language: &str,
    package: &str,
) -> miette::Result<()> {
    ui::info(&format!("Watching for changes in {}", spec.display()));
    println!();

    // Channel for file change events
    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);

    // Set up file watcher
    let watch_path = spec.to_path_buf();
    let tx_clone = tx.clone();

    std::thread::spawn(move || {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(500),
            move |result: DebounceEventResult| {
                if let Ok(events) = result {
                    if !events.is_empty() {
                        let _ = notify_tx.send(());
                    }
                }
            },
        )
        .expect("Failed to create file watcher");

        debouncer
            .watcher()
            .watch(&watch_path, RecursiveMode::Recursive)
            .expect("Failed to watch path");

        loop {
            if notify_rx.recv().is_ok() {
                let _ = tx_clone.try_send(());
            }
        }
    });

    let spec = spec.to_path_buf();
    let output = output.to_path_buf();
    let language = language.to_string();
    let package = package.to_string();

    ui::info("Ready! Waiting for changes...");

    loop {
        tokio::select! {
            _ = rx.recv() => {
                println!();
                let spinner = ui::spinner("Change detected, regenerating...");
                let start = Instant::now();

                let config = GeneratorConfig {
                    spec_path: spec.clone(),
                    out_dir: output.clone(),
                    language: language.clone(),
                    package: package.clone(),
                    skip_lock_check: false,
                    force: false,
                };

                let generator = Generator::new(config);
                match generator.generate() {
                    Ok(result) => {
                        spinner.finish_and_clear();
                        let duration = start.elapsed().as_millis();
                        ui::success(&format!(
                            "Regenerated {} model(s) in {}ms",
                            result.models,
                            duration
                        ));
                    }
                    Err(e) => {
                        spinner.finish_and_clear();
                        ui::error(&format!("{}", e));
                    }
                }
                println!();
                ui::info("Ready! Waiting for changes...");
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                ui::dim("Stopping watch mode.");
                break;
            }
        }
    }

    Ok(())
}

/// Handle lock management commands.
fn handle_lock_command(action: LockAction) -> miette::Result<()> {
    match action {
        LockAction::Status { spec } => lock_status(&spec),
        LockAction::Sync { spec, force } => lock_sync(&spec, force),
        LockAction::Diff { spec } => lock_diff(&spec),
        LockAction::Reset {
            spec,
            i_know_what_im_doing,
        } => lock_reset(&spec, i_know_what_im_doing),
    }
}

/// Show lock status.
fn lock_status(spec: &PathBuf) -> miette::Result<()> {
    use swaggen_compiler::manifest::{diff_graph, ModelsLockFile};

    let spinner = ui::spinner("Loading lock information...");

    let graph = swaggen_compiler::loader::load(spec)?;

    let lock_path = swaggen_compiler::manifest::lock::default_lock_path(spec);
    let lock_file = ModelsLockFile::load(&lock_path)?;

    spinner.finish_and_clear();

    println!();
    ui::box_header(&format!("{} Lock Status", ui::symbols::DIAMOND));
    ui::box_line("");
    ui::box_line(&format!(
        "Lock file: {}",
        if lock_file.is_some() {
            lock_path.display().to_string()
        } else {
            "not found".to_string()
        }
    ));
    ui::box_line(&format!(
        "Models: {} ({} listable)",
        graph.models.len(),
        graph.list_count()
    ));
    ui::box_line("");

    match &lock_file {
        Some(locked) => {
            let diffs = diff_graph(&locked.models, &graph);
            if diffs.is_empty() {
                ui::box_line("Status: No wire surface changes detected");
            } else {
                let breaking_count = diffs.iter().filter(|d| d.is_breaking()).count();
                if breaking_count > 0 {
                    ui::box_line(&format!(
                        "Status: {} breaking change(s) detected!",
                        breaking_count
                    ));
                    ui::box_line("        Run `swaggen lock diff` for details");
                } else {
                    ui::box_line(&format!(
                        "Status: {} non-breaking change(s) detected",
                        diffs.len()
                    ));
                    ui::box_line("        The lock updates on next generate");
                }
            }
        }
        None => {
            ui::box_line("Status: No compatibility guard yet");
            ui::box_line("        Run `swaggen lock sync` to generate");
        }
    }

    ui::box_footer();
    println!();

    Ok(())
}

/// Generate or update the lock file.
fn lock_sync(spec: &PathBuf, force: bool) -> miette::Result<()> {
    use swaggen_compiler::manifest::{diff_graph, ModelsLockFile};

    let spinner = ui::spinner("Syncing lock file...");

    let graph = swaggen_compiler::loader::load(spec)?;

    let lock_path = swaggen_compiler::manifest::lock::default_lock_path(spec);
    let existing = ModelsLockFile::load(&lock_path)?;

    // Check for breaking changes if a lock file exists
    if let Some(ref locked) = existing {
        let diffs = diff_graph(&locked.models, &graph);
        let breaking: Vec<_> = diffs.iter().filter(|d| d.is_breaking()).collect();

        if !breaking.is_empty() && !force {
            spinner.finish_and_clear();
            ui::nope_header();
            println!();
            println!("  Breaking changes detected:");
            for diff in &breaking {
                println!("    {}", diff.model);
                println!("{}", diff.format_changes());
            }
            println!();
            println!("  Use --force to sync anyway (WARNING: breaks existing client code)");
            return Err(miette::miette!("Breaking changes detected"));
        }
    }

    let lock = ModelsLockFile::from_graph(&graph, env!("CARGO_PKG_VERSION"));
    lock.save(&lock_path)?;

    spinner.finish_and_clear();
    ui::looking_good();
    println!();
    println!("    Lock file updated: {}", lock_path.display());
    println!(
        "    {} models, {} fields captured",
        lock.models.len(),
        lock.models.values().map(|m| m.fields.len()).sum::<usize>()
    );

    Ok(())
}

/// Show diff between the current document and the lock file.
fn lock_diff(spec: &PathBuf) -> miette::Result<()> {
    use swaggen_compiler::manifest::{diff_graph, ModelsLockFile};

    let spinner = ui::spinner("Comparing wire surfaces...");

    let graph = swaggen_compiler::loader::load(spec)?;

    let lock_path = swaggen_compiler::manifest::lock::default_lock_path(spec);
    let locked = ModelsLockFile::load(&lock_path)?;

    spinner.finish_and_clear();

    match locked {
        None => {
            println!();
            println!("  No lock file found at {}", lock_path.display());
            println!("  Run `swaggen lock sync` to generate one");
        }
        Some(locked) => {
            let diffs = diff_graph(&locked.models, &graph);

            if diffs.is_empty() {
                ui::looking_good();
                println!();
                println!("    No wire surface changes detected");
            } else {
                println!();
                ui::box_header(&format!("{} Wire Surface Changes", ui::symbols::TRIANGLE));
                ui::box_line("");

                for diff in &diffs {
                    let marker = if diff.is_breaking() { "BREAKING" } else { "OK" };
                    ui::box_line(&format!("{} [{}]", diff.model, marker));
                    for line in diff.format_changes().lines() {
                        ui::box_line(line);
                    }
                    ui::box_line("");
                }

                ui::box_footer();
            }
        }
    }

    Ok(())
}

/// Delete the lock file.
fn lock_reset(spec: &PathBuf, confirmed: bool) -> miette::Result<()> {
    let lock_path = swaggen_compiler::manifest::lock::default_lock_path(spec);

    if !confirmed {
        ui::nope_header();
        println!();
        println!("  This will delete the wire-compatibility lock file.");
        println!("  The next generation accepts any surface change silently,");
        println!("  including ones that break existing client code.");
        println!();
        println!("  If you're sure, run:");
        println!("    swaggen lock reset --i-know-what-im-doing");
        return Ok(());
    }

    if lock_path.exists() {
        std::fs::remove_file(&lock_path)
            .map_err(|e| miette::miette!("Failed to delete lock file: {}", e))?;

        println!();
        println!("  Lock file deleted: {}", lock_path.display());
        println!("  Run `swaggen lock sync` to generate a new one");
    } else {
        println!();
        println!("  No lock file found at {}", lock_path.display());
    }

    Ok(())
}
