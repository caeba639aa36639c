//! Wire-surface diff against the lock file.
//!
//! Changes classify by what they do to the generated client surface:
//!
//! - **Non-breaking**: additions. A new model or a new field extends the
//!   surface; existing call sites and wire documents are untouched.
//! - **Breaking**: removals, type changes, and required-flag flips. A flip
//!   is breaking in both directions because the pointer-ness of the emitted
//!   member changes either way.

use std::collections::BTreeMap;

use super::lock::{FieldLock, ModelLock};
use crate::ir::SchemaGraph;

/// A change to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    /// A new field was added.
    Added { wire_key: String, lock: FieldLock },

    /// A field was removed.
    Removed { wire_key: String, lock: FieldLock },

    /// A field's type changed.
    TypeChanged {
        wire_key: String,
        old_type: String,
        new_type: String,
    },

    /// A field's required status changed.
    RequiredChanged { wire_key: String, now_required: bool },
}

impl FieldChange {
    /// Whether this change is breaking.
    pub fn is_breaking(&self) -> bool {
        match self {
            FieldChange::Added { .. } => false,
            FieldChange::Removed { .. } => true,
            FieldChange::TypeChanged { .. } => true,
            FieldChange::RequiredChanged { .. } => true,
        }
    }
}

/// Diff result for a single model.
#[derive(Debug, Clone)]
pub struct ModelDiff {
    /// Model name.
    pub model: String,
    /// Whether the whole model disappeared from the graph.
    pub removed: bool,
    /// Field-level changes (empty when `removed`).
    pub changes: Vec<FieldChange>,
}

impl ModelDiff {
    /// Whether this diff contains any breaking change.
    pub fn is_breaking(&self) -> bool {
        self.removed || self.changes.iter().any(|c| c.is_breaking())
    }

    /// Format the diff for display.
    pub fn format_changes(&self) -> String {
        if self.removed {
            return format!("  - Model '{}' removed (BREAKING)", self.model);
        }

        let mut lines = Vec::new();
        for change in &self.changes {
            let desc = match change {
                FieldChange::Added { wire_key, lock } => {
                    let opt = if lock.required { "" } else { "?" };
                    format!("+ Field '{}': {}{}", wire_key, lock.typ, opt)
                }
                FieldChange::Removed { wire_key, .. } => {
                    format!("- Field '{}' removed", wire_key)
                }
                FieldChange::TypeChanged {
                    wire_key,
                    old_type,
                    new_type,
                } => format!(
                    "~ Field '{}' type changed: {} -> {}",
                    wire_key, old_type, new_type
                ),
                FieldChange::RequiredChanged {
                    wire_key,
                    now_required,
                } => {
                    if *now_required {
                        format!("~ Field '{}' changed from optional to required", wire_key)
                    } else {
                        format!("~ Field '{}' changed from required to optional", wire_key)
                    }
                }
            };

            let marker = if change.is_breaking() {
                "(BREAKING)"
            } else {
                "(OK)"
            };
            lines.push(format!("  {} {}", desc, marker));
        }

        lines.join("\n")
    }
}

/// Compare two field surfaces and return the differences.
pub fn diff_fields(
    locked: &BTreeMap<String, FieldLock>,
    current: &BTreeMap<String, FieldLock>,
) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    // Removed or changed fields
    for (wire_key, locked_field) in locked {
        match current.get(wire_key) {
            None => {
                changes.push(FieldChange::Removed {
                    wire_key: wire_key.clone(),
                    lock: locked_field.clone(),
                });
            }
            Some(current_field) => {
                if locked_field.typ != current_field.typ {
                    changes.push(FieldChange::TypeChanged {
                        wire_key: wire_key.clone(),
                        old_type: locked_field.typ.clone(),
                        new_type: current_field.typ.clone(),
                    });
                } else if locked_field.required != current_field.required {
                    changes.push(FieldChange::RequiredChanged {
                        wire_key: wire_key.clone(),
                        now_required: current_field.required,
                    });
                }
            }
        }
    }

    // Added fields
    for (wire_key, current_field) in current {
        if !locked.contains_key(wire_key) {
            changes.push(FieldChange::Added {
                wire_key: wire_key.clone(),
                lock: current_field.clone(),
            });
        }
    }

    changes
}

/// Compare the lock file surface against the current graph.
///
/// Returns a list of all per-model diffs (empty if the surfaces match).
/// Models new to the graph are additions and produce no diff entry.
pub fn diff_graph(locked: &BTreeMap<String, ModelLock>, current: &SchemaGraph) -> Vec<ModelDiff> {
    let current_lock = super::lock::ModelsLockFile::from_graph(current, "");
    let mut diffs = Vec::new();

    for (name, locked_model) in locked {
        match current_lock.models.get(name) {
            None => {
                diffs.push(ModelDiff {
                    model: name.clone(),
                    removed: true,
                    changes: Vec::new(),
                });
            }
            Some(current_model) => {
                // Hashes match means the whole surface matches.
                if locked_model.hash == current_model.hash {
                    continue;
                }

                let changes = diff_fields(&locked_model.fields, &current_model.fields);
                if !changes.is_empty() {
                    diffs.push(ModelDiff {
                        model: name.clone(),
                        removed: false,
                        changes,
                    });
                }
            }
        }
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(typ: &str, required: bool) -> FieldLock {
        FieldLock {
            typ: typ.to_string(),
            required,
        }
    }

    fn surface(entries: &[(&str, FieldLock)]) -> BTreeMap<String, FieldLock> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_no_changes() {
        let locked = surface(&[("name", field("string", true))]);
        let current = surface(&[("name", field("string", true))]);

        assert!(diff_fields(&locked, &current).is_empty());
    }

    #[test]
    fn test_added_field_is_not_breaking() {
        let locked = surface(&[("name", field("string", true))]);
        let current = surface(&[
            ("name", field("string", true)),
            ("description", field("string", false)),
        ]);

        let changes = diff_fields(&locked, &current);
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], FieldChange::Added { wire_key, .. }
            if wire_key == "description"));
        assert!(!changes[0].is_breaking());
    }

    #[test]
    fn test_removed_field_is_breaking() {
        let locked = surface(&[
            ("name", field("string", true)),
            ("count", field("int32", false)),
        ]);
        let current = surface(&[("name", field("string", true))]);

        let changes = diff_fields(&locked, &current);
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], FieldChange::Removed { wire_key, .. } if wire_key == "count"));
        assert!(changes[0].is_breaking());
    }

    #[test]
    fn test_type_change_is_breaking() {
        let locked = surface(&[("count", field("string", false))]);
        let current = surface(&[("count", field("int32", false))]);

        let changes = diff_fields(&locked, &current);
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], FieldChange::TypeChanged { .. }));
        assert!(changes[0].is_breaking());
    }

    #[test]
    fn test_required_flip_is_breaking_both_ways() {
        let locked = surface(&[("name", field("string", true))]);
        let current = surface(&[("name", field("string", false))]);
        let changes = diff_fields(&locked, &current);
        assert!(changes[0].is_breaking());

        let changes_back = diff_fields(&current, &locked);
        assert!(changes_back[0].is_breaking());
    }

    #[test]
    fn test_format_changes() {
        let diff = ModelDiff {
            model: "Widget".to_string(),
            removed: false,
            changes: vec![
                FieldChange::Added {
                    wire_key: "description".to_string(),
                    lock: field("string", false),
                },
                FieldChange::Removed {
                    wire_key: "count".to_string(),
                    lock: field("int32", false),
                },
            ],
        };

        let text = diff.format_changes();
        assert!(text.contains("+ Field 'description': string? (OK)"));
        assert!(text.contains("- Field 'count' removed (BREAKING)"));
        assert!(diff.is_breaking());
    }
}
