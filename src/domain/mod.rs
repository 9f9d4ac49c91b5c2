//! Domain layer: core entities and pure state transitions.

pub mod archive_state;
pub mod chat;
pub mod dialogs_state;
pub mod effects;
pub mod events;
pub mod pane_state;
pub mod search_state;
pub mod snapshot;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
