//! Wire-compatibility lock file management.
//!
//! The lock file (`models.lock.json`) captures every model's wire surface at
//! a point in time: wire keys, semantic types, required flags. Subsequent
//! runs compare the freshly resolved graph against it so that a regeneration
//! which would silently change the client's wire behavior is caught at
//! generation time instead of at a production API call.

pub mod diff;
pub mod lock;

pub use diff::{diff_graph, FieldChange, ModelDiff};
pub use lock::{FieldLock, ModelLock, ModelsLockFile, type_to_string};
