//! Report generation port trait.

use std::path::Path;

use crate::domain::engine::Engine;
use crate::domain::error::TicksimError;

/// Read-only consumer of the engine's recorded history. Implementations
/// may only use the engine's accessors; nothing here mutates state.
pub trait ReportPort {
    fn write(&self, engine: &Engine, output_dir: &Path) -> Result<(), TicksimError>;
}
