//! UI layer: headless driver for the dialogs column.

pub mod event_source;
pub mod pane;
pub mod script;
pub mod shell;
pub mod view;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
