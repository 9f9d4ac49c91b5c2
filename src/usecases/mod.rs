//! Use case layer: the dialogs orchestrator and its wiring.

pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod dialogs;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
